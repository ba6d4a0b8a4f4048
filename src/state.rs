//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::cache::redis_client::RedisClient;
use crate::cache::EquipmentCache;
use crate::config::{EnvironmentConfig, OperationsConfig};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub operations: OperationsConfig,
    pub redis: RedisClient,
    pub equipment_cache: EquipmentCache,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        operations: OperationsConfig,
        redis: RedisClient,
    ) -> Self {
        let equipment_cache = EquipmentCache::new(redis.clone());
        Self {
            pool,
            config,
            operations,
            redis,
            equipment_cache,
        }
    }
}
