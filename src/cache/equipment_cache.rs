//! Invalidación de cache de estado de equipo
//!
//! Rutina compartida por todos los caminos de escritura (averías, status
//! logs directos, bulk updates): borra las cuatro claves por equipo más los
//! agregados del dashboard que resumen estado de flota. Es idempotente -
//! borrar una clave inexistente es un no-op.

use tracing::debug;

use super::redis_client::{
    dashboard_equipment_status_key, dashboard_equipment_summary_key,
    dashboard_production_metrics_key, dashboard_recent_activities_key,
    equipment_active_breakdown_key, equipment_breakdown_reason_key, equipment_can_work_key,
    equipment_status_key, RedisClient,
};
use super::CacheOperations;

/// Rangos de métricas de producción cacheadas en el dashboard
pub const PRODUCTION_METRIC_RANGES: [&str; 3] = ["today", "week", "month"];

#[derive(Clone)]
pub struct EquipmentCache {
    redis: RedisClient,
}

impl EquipmentCache {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }

    pub fn redis(&self) -> &RedisClient {
        &self.redis
    }

    /// Claves por equipo que dependen del estado derivado
    fn equipment_keys(equipment_id: i64) -> Vec<String> {
        vec![
            equipment_status_key(equipment_id),
            equipment_can_work_key(equipment_id),
            equipment_breakdown_reason_key(equipment_id),
            equipment_active_breakdown_key(equipment_id),
        ]
    }

    /// Claves de dashboard que resumen estado de equipos
    fn dashboard_keys() -> Vec<String> {
        let mut keys = vec![
            dashboard_equipment_status_key(),
            dashboard_equipment_summary_key(),
            dashboard_recent_activities_key(),
        ];
        for range in PRODUCTION_METRIC_RANGES {
            keys.push(dashboard_production_metrics_key(range));
        }
        keys
    }

    /// Invalidar todo lo derivado del estado de un equipo
    pub async fn invalidate(&self, equipment_id: i64) {
        debug!("🧹 Invalidando cache de equipo {}", equipment_id);

        let mut keys = Self::equipment_keys(equipment_id);
        keys.extend(Self::dashboard_keys());

        for key in keys {
            // delete ya degrada errores de Redis a no-op
            let _ = self.redis.delete(&key).await;
        }
    }

    /// Invalidación en lote para operaciones que tocan varios equipos
    pub async fn invalidate_many(&self, equipment_ids: &[i64]) {
        let unique: std::collections::BTreeSet<i64> = equipment_ids.iter().copied().collect();

        let futures = unique.into_iter().map(|id| self.invalidate(id));
        futures::future::join_all(futures).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_keys_cover_resolver_outputs() {
        let keys = EquipmentCache::equipment_keys(3);
        assert_eq!(keys.len(), 4);
        assert!(keys.iter().any(|k| k.contains("equipment_status")));
        assert!(keys.iter().any(|k| k.contains("equipment_can_work")));
        assert!(keys.iter().any(|k| k.contains("equipment_breakdown_reason")));
        assert!(keys.iter().any(|k| k.contains("equipment_active_breakdown")));
        assert!(keys.iter().all(|k| k.ends_with(":3")));
    }

    #[test]
    fn test_dashboard_keys_include_all_ranges() {
        let keys = EquipmentCache::dashboard_keys();
        assert_eq!(keys.len(), 6);
        for range in PRODUCTION_METRIC_RANGES {
            assert!(keys.iter().any(|k| k.ends_with(&format!("production_metrics_{}", range))));
        }
        assert!(keys.iter().any(|k| k.ends_with("recent_activities")));
    }
}
