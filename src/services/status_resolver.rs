//! Status Resolver
//!
//! Calcula el estado operacional actual de un equipo a partir de dos logs
//! append-only: el historial de estados y las averías. La regla es función
//! pura del estado persistido:
//!
//! 1. Si existe alguna avería activa (ongoing/pending_parts) → `breakdown`,
//!    sin importar lo que diga el último status log.
//! 2. Si no, el estado del último status log por (status_time, id).
//! 3. Sin logs → `idle`.
//!
//! Las cuatro salidas (status, can_work, breakdown_reason, active_breakdown)
//! se memoizan por equipo en Redis con TTL configurable (default 300 s).

use sqlx::PgPool;

use crate::cache::redis_client::{
    equipment_active_breakdown_key, equipment_breakdown_reason_key, equipment_can_work_key,
    equipment_status_key,
};
use crate::cache::EquipmentCache;
use crate::models::breakdown::EquipmentBreakdown;
use crate::models::status_log::OperationalStatus;
use crate::repositories::breakdown_repository::BreakdownRepository;
use crate::repositories::status_log_repository::StatusLogRepository;
use crate::utils::errors::AppResult;

/// Regla de resolución, pura y sin defaults mágicos: un status desconocido
/// en un log histórico degrada a `idle` en vez de fallar la lectura.
pub fn resolve_status(
    has_active_breakdown: bool,
    latest_log_status: Option<&str>,
) -> OperationalStatus {
    if has_active_breakdown {
        return OperationalStatus::Breakdown;
    }

    match latest_log_status {
        Some(status) => OperationalStatus::parse(status).unwrap_or(OperationalStatus::Idle),
        None => OperationalStatus::Idle,
    }
}

/// Resolver con memoización por equipo
#[derive(Clone)]
pub struct StatusResolver {
    pool: PgPool,
    cache: EquipmentCache,
    ttl: u64,
}

impl StatusResolver {
    pub fn new(pool: PgPool, cache: EquipmentCache, ttl: u64) -> Self {
        Self { pool, cache, ttl }
    }

    /// Estado operacional actual del equipo
    pub async fn current_status(&self, equipment_id: i64) -> AppResult<OperationalStatus> {
        let key = equipment_status_key(equipment_id);
        let pool = self.pool.clone();

        self.cache
            .redis()
            .remember(&key, self.ttl, || async move {
                let has_active = BreakdownRepository::new(pool.clone())
                    .has_active_for_equipment(equipment_id)
                    .await?;
                let latest = StatusLogRepository::new(pool)
                    .latest_for_equipment(equipment_id)
                    .await?;

                Ok(resolve_status(
                    has_active,
                    latest.as_ref().map(|log| log.status.as_str()),
                ))
            })
            .await
    }

    /// El equipo puede ponerse a trabajar: no tiene averías activas.
    /// Independiente del contenido del status log.
    pub async fn can_work(&self, equipment_id: i64) -> AppResult<bool> {
        let key = equipment_can_work_key(equipment_id);
        let pool = self.pool.clone();

        self.cache
            .redis()
            .remember(&key, self.ttl, || async move {
                let has_active = BreakdownRepository::new(pool)
                    .has_active_for_equipment(equipment_id)
                    .await?;
                Ok(!has_active)
            })
            .await
    }

    /// Avería activa más reciente por start_time, si la hay. Con varias
    /// averías activas simultáneas se expone solo la más reciente.
    pub async fn active_breakdown(
        &self,
        equipment_id: i64,
    ) -> AppResult<Option<EquipmentBreakdown>> {
        let key = equipment_active_breakdown_key(equipment_id);
        let pool = self.pool.clone();

        self.cache
            .redis()
            .remember(&key, self.ttl, || async move {
                BreakdownRepository::new(pool)
                    .latest_active_for_equipment(equipment_id)
                    .await
            })
            .await
    }

    /// Descripción de la avería activa - solo tiene sentido cuando
    /// `current_status` = breakdown
    pub async fn breakdown_reason(&self, equipment_id: i64) -> AppResult<Option<String>> {
        let key = equipment_breakdown_reason_key(equipment_id);
        let pool = self.pool.clone();

        self.cache
            .redis()
            .remember(&key, self.ttl, || async move {
                let active = BreakdownRepository::new(pool)
                    .latest_active_for_equipment(equipment_id)
                    .await?;
                Ok(active.map(|b| b.description))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_breakdown_overrides_latest_log() {
        // La avería activa manda, diga lo que diga el log
        assert_eq!(resolve_status(true, Some("working")), OperationalStatus::Breakdown);
        assert_eq!(resolve_status(true, Some("idle")), OperationalStatus::Breakdown);
        assert_eq!(resolve_status(true, Some("maintenance")), OperationalStatus::Breakdown);
        assert_eq!(resolve_status(true, None), OperationalStatus::Breakdown);
    }

    #[test]
    fn test_latest_log_wins_without_breakdowns() {
        assert_eq!(resolve_status(false, Some("working")), OperationalStatus::Working);
        assert_eq!(resolve_status(false, Some("idle")), OperationalStatus::Idle);
        assert_eq!(resolve_status(false, Some("maintenance")), OperationalStatus::Maintenance);
        // Un log histórico puede decir "breakdown" aunque la avería ya no
        // esté activa; se respeta tal cual
        assert_eq!(resolve_status(false, Some("breakdown")), OperationalStatus::Breakdown);
    }

    #[test]
    fn test_defaults_to_idle() {
        assert_eq!(resolve_status(false, None), OperationalStatus::Idle);
    }

    #[test]
    fn test_unknown_log_status_degrades_to_idle() {
        assert_eq!(resolve_status(false, Some("parked")), OperationalStatus::Idle);
        assert_eq!(resolve_status(false, Some("")), OperationalStatus::Idle);
    }
}
