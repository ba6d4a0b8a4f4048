//! Cache
//!
//! Este módulo contiene el cliente Redis, las claves de cache y la rutina
//! de invalidación por equipo.

pub mod cache_config;
pub mod equipment_cache;
pub mod redis_client;

pub use cache_config::CacheConfig;
pub use equipment_cache::EquipmentCache;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

/// Operaciones de cache
#[async_trait::async_trait]
pub trait CacheOperations {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
    async fn exists(&self, key: &str) -> Result<bool>;
    async fn ttl(&self, key: &str) -> Result<Option<u64>>;
}
