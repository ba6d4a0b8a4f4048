//! Cliente Redis
//!
//! Cliente con connection pooling, operaciones async y el patrón
//! `remember` (get-or-compute). Las lecturas de cache nunca fallan el
//! request: un error de Redis se degrada a cache miss.

use anyhow::Result;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use tracing::{debug, error, info, warn};

use super::{CacheConfig, CacheOperations};
use crate::utils::errors::AppResult;

/// Cliente Redis con connection pooling y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager })
    }

    /// Obtener el valor cacheado o computarlo, guardarlo y devolverlo.
    /// Un fallo al leer o escribir el cache degrada a recomputar, nunca
    /// propaga error al caller.
    pub async fn remember<T, F, Fut>(&self, key: &str, ttl: u64, compute: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Ok(Some(cached)) = self.get::<T>(key).await {
            return Ok(cached);
        }

        let value = compute().await?;

        if let Err(e) = self.set(key, &value, ttl).await {
            warn!("⚠️ No se pudo guardar en cache la clave {}: {}", key, e);
        }

        Ok(value)
    }
}

/// Generar clave de cache con prefijo de la aplicación
fn make_key(prefix: &str, identifier: &str) -> String {
    format!("mining_ops:{}:{}", prefix, identifier)
}

/// Claves por equipo - una por cada salida del status resolver
pub fn equipment_status_key(equipment_id: i64) -> String {
    make_key("equipment_status", &equipment_id.to_string())
}

pub fn equipment_can_work_key(equipment_id: i64) -> String {
    make_key("equipment_can_work", &equipment_id.to_string())
}

pub fn equipment_breakdown_reason_key(equipment_id: i64) -> String {
    make_key("equipment_breakdown_reason", &equipment_id.to_string())
}

pub fn equipment_active_breakdown_key(equipment_id: i64) -> String {
    make_key("equipment_active_breakdown", &equipment_id.to_string())
}

/// Claves de agregados del dashboard que resumen estado de equipos
pub fn dashboard_equipment_status_key() -> String {
    make_key("dashboard", "equipment_status")
}

pub fn dashboard_equipment_summary_key() -> String {
    make_key("dashboard", "equipment_summary")
}

pub fn dashboard_production_metrics_key(range: &str) -> String {
    make_key("dashboard", &format!("production_metrics_{}", range))
}

pub fn dashboard_recent_activities_key() -> String {
    make_key("dashboard", "recent_activities")
}

#[async_trait::async_trait]
impl CacheOperations for RedisClient {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.manager.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("📥 Cache HIT para clave: {}", key);
                let deserialized: T = serde_json::from_str(&value)?;
                Ok(Some(deserialized))
            }
            Ok(None) => {
                debug!("❌ Cache MISS para clave: {}", key);
                Ok(None)
            }
            Err(e) => {
                warn!("⚠️ Error leyendo cache para clave {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()> {
        let mut conn = self.manager.clone();

        let serialized = serde_json::to_string(value)?;

        let result: RedisResult<()> = conn.set_ex(key, serialized, ttl).await;

        match result {
            Ok(()) => {
                debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando en cache para clave {}: {}", key, e);
                Err(anyhow::anyhow!("Error de Redis: {}", e))
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();

        let result: RedisResult<i64> = conn.del(key).await;

        match result {
            Ok(count) => {
                debug!("🗑️ Cache DELETE para clave: {} (eliminados: {})", key, count);
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Error eliminando cache para clave {}: {}", key, e);
                Ok(()) // No fallar si no se puede eliminar
            }
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.manager.clone();

        match conn.exists(key).await {
            Ok(exists) => Ok(exists),
            Err(e) => {
                warn!("⚠️ Error verificando existencia de clave {}: {}", key, e);
                Ok(false)
            }
        }
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>> {
        let mut conn = self.manager.clone();

        match conn.ttl::<_, i64>(key).await {
            Ok(ttl) if ttl > 0 => Ok(Some(ttl as u64)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("⚠️ Error obteniendo TTL para clave {}: {}", key, e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_keys_are_per_id() {
        assert_eq!(equipment_status_key(7), "mining_ops:equipment_status:7");
        assert_eq!(equipment_can_work_key(7), "mining_ops:equipment_can_work:7");
        assert_ne!(equipment_status_key(7), equipment_status_key(8));
    }

    #[test]
    fn test_dashboard_keys() {
        assert_eq!(dashboard_equipment_status_key(), "mining_ops:dashboard:equipment_status");
        assert_eq!(
            dashboard_production_metrics_key("today"),
            "mining_ops:dashboard:production_metrics_today"
        );
        assert_eq!(
            dashboard_recent_activities_key(),
            "mining_ops:dashboard:recent_activities"
        );
    }
}
