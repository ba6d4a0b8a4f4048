//! Agregados del dashboard de analítica
//!
//! Cuatro vistas cacheadas: el tablero de estado por equipo, el resumen de
//! flota, las métricas de producción por rango (today/week/month) y el feed
//! de actividad reciente. Cada una se memoiza bajo su propia clave y se
//! invalida junto con el estado de equipo.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::cache::redis_client::{
    dashboard_equipment_status_key, dashboard_equipment_summary_key,
    dashboard_production_metrics_key, dashboard_recent_activities_key,
};
use crate::cache::EquipmentCache;
use crate::dto::dashboard_dto::{
    EquipmentBoardEntry, EquipmentSummary, ProductionMetrics, RecentActivityEntry,
};
use crate::repositories::breakdown_repository::BreakdownRepository;
use crate::repositories::equipment_repository::EquipmentRepository;
use crate::repositories::loading_session_repository::LoadingSessionRepository;
use crate::repositories::status_log_repository::StatusLogRepository;
use crate::services::status_resolver::StatusResolver;
use crate::utils::errors::{bad_request_error, AppResult};

/// Límites [from, to) de un rango de métricas. `today` arranca a
/// medianoche UTC, `week` el lunes, `month` el día 1.
pub fn range_bounds(range: &str, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start_of_day = Utc
        .with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
        .single()?;

    let from = match range {
        "today" => start_of_day,
        "week" => start_of_day - Duration::days(now.weekday().num_days_from_monday() as i64),
        "month" => Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0).single()?,
        _ => return None,
    };

    Some((from, now))
}

/// Cantidad de entradas del feed de actividad reciente
pub const RECENT_ACTIVITY_LIMIT: usize = 20;

/// Mezclar status logs y averías en un solo feed, más reciente primero,
/// recortado a `limit`
pub fn merge_activity_feed(
    mut entries: Vec<RecentActivityEntry>,
    limit: usize,
) -> Vec<RecentActivityEntry> {
    entries.sort_by(|a, b| b.happened_at.cmp(&a.happened_at));
    entries.truncate(limit);
    entries
}

#[derive(Clone)]
pub struct DashboardService {
    pool: PgPool,
    cache: EquipmentCache,
    resolver: StatusResolver,
    fuel_warning_level: f64,
    ttl: u64,
}

impl DashboardService {
    pub fn new(
        pool: PgPool,
        cache: EquipmentCache,
        resolver: StatusResolver,
        fuel_warning_level: f64,
        ttl: u64,
    ) -> Self {
        Self {
            pool,
            cache,
            resolver,
            fuel_warning_level,
            ttl,
        }
    }

    /// Tablero de estado operacional por equipo activo
    pub async fn equipment_board(&self) -> AppResult<Vec<EquipmentBoardEntry>> {
        let key = dashboard_equipment_status_key();
        let pool = self.pool.clone();
        let resolver = self.resolver.clone();

        self.cache
            .redis()
            .remember(&key, self.ttl, || async move {
                let equipment = EquipmentRepository::new(pool).list_active().await?;

                let mut entries = Vec::with_capacity(equipment.len());
                for item in equipment {
                    let status = resolver.current_status(item.id).await?;
                    let can_work = resolver.can_work(item.id).await?;
                    let breakdown_reason = resolver.breakdown_reason(item.id).await?;

                    entries.push(EquipmentBoardEntry {
                        equipment_id: item.id,
                        code: item.code,
                        equipment_type: item.equipment_type,
                        current_status: status.as_str().to_string(),
                        status_color: status.color().to_string(),
                        can_work,
                        breakdown_reason,
                    });
                }

                Ok(entries)
            })
            .await
    }

    /// Resumen agregado de la flota: distribuciones por estado y tipo,
    /// averías críticas activas y equipos con combustible bajo
    pub async fn equipment_summary(&self) -> AppResult<EquipmentSummary> {
        let key = dashboard_equipment_summary_key();
        let pool = self.pool.clone();
        let resolver = self.resolver.clone();
        let fuel_warning_level = self.fuel_warning_level;

        self.cache
            .redis()
            .remember(&key, self.ttl, || async move {
                let equipment = EquipmentRepository::new(pool.clone()).list_active().await?;

                let mut by_status: BTreeMap<String, i64> = BTreeMap::new();
                let mut by_type: BTreeMap<String, i64> = BTreeMap::new();
                let total_equipment = equipment.len() as i64;

                for item in &equipment {
                    let status = resolver.current_status(item.id).await?;
                    *by_status.entry(status.as_str().to_string()).or_insert(0) += 1;
                    *by_type.entry(item.equipment_type.clone()).or_insert(0) += 1;
                }

                let critical_breakdowns = BreakdownRepository::new(pool.clone())
                    .count_active_critical()
                    .await?;
                let low_fuel_count = StatusLogRepository::new(pool)
                    .count_low_fuel_equipment(fuel_warning_level)
                    .await?;

                Ok(EquipmentSummary {
                    total_equipment,
                    by_status,
                    by_type,
                    critical_breakdowns,
                    low_fuel_count,
                })
            })
            .await
    }

    /// Feed de actividad reciente de la flota: últimos status logs y
    /// averías mezclados en orden cronológico inverso
    pub async fn recent_activities(&self) -> AppResult<Vec<RecentActivityEntry>> {
        let key = dashboard_recent_activities_key();
        let pool = self.pool.clone();

        self.cache
            .redis()
            .remember(&key, self.ttl, || async move {
                let limit = RECENT_ACTIVITY_LIMIT as i64;

                let logs = StatusLogRepository::new(pool.clone())
                    .recent_across_fleet(limit)
                    .await?;
                let breakdowns = BreakdownRepository::new(pool)
                    .recent_across_fleet(limit)
                    .await?;

                let entries = logs
                    .into_iter()
                    .map(RecentActivityEntry::from)
                    .chain(breakdowns.into_iter().map(RecentActivityEntry::from))
                    .collect();

                Ok(merge_activity_feed(entries, RECENT_ACTIVITY_LIMIT))
            })
            .await
    }

    /// Métricas de producción para `today`, `week` o `month`
    pub async fn production_metrics(&self, range: &str) -> AppResult<ProductionMetrics> {
        let now = Utc::now();
        let (from, to) = range_bounds(range, now)
            .ok_or_else(|| bad_request_error("Rango inválido: usar today, week o month"))?;

        let key = dashboard_production_metrics_key(range);
        let pool = self.pool.clone();
        let range = range.to_string();

        self.cache
            .redis()
            .remember(&key, self.ttl, || async move {
                let (total_sessions, total_buckets, total_tonnage) =
                    LoadingSessionRepository::new(pool.clone())
                        .production_totals_between(from, to)
                        .await?;

                let breakdowns_reported = BreakdownRepository::new(pool)
                    .count_started_between(from, to)
                    .await?;

                Ok(ProductionMetrics {
                    range,
                    from,
                    to,
                    total_sessions,
                    total_buckets,
                    total_tonnage,
                    breakdowns_reported,
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds_today() {
        let now = Utc.with_ymd_and_hms(2025, 8, 6, 14, 30, 45).unwrap();
        let (from, to) = range_bounds("today", now).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2025, 8, 6, 0, 0, 0).unwrap());
        assert_eq!(to, now);
    }

    #[test]
    fn test_range_bounds_week_starts_monday() {
        // 2025-08-06 es miércoles; la semana arranca el lunes 04
        let now = Utc.with_ymd_and_hms(2025, 8, 6, 14, 30, 45).unwrap();
        let (from, _) = range_bounds("week", now).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2025, 8, 4, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_range_bounds_month() {
        let now = Utc.with_ymd_and_hms(2025, 8, 6, 14, 30, 45).unwrap();
        let (from, _) = range_bounds("month", now).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_range_bounds_rejects_unknown() {
        assert!(range_bounds("year", Utc::now()).is_none());
        assert!(range_bounds("", Utc::now()).is_none());
    }

    fn feed_entry(activity_type: &str, happened_at: DateTime<Utc>) -> RecentActivityEntry {
        RecentActivityEntry {
            activity_type: activity_type.to_string(),
            equipment_id: 1,
            equipment_code: "DT-001".to_string(),
            status: "working".to_string(),
            severity: None,
            detail: None,
            happened_at,
        }
    }

    #[test]
    fn test_merge_activity_feed_orders_newest_first() {
        let now = Utc::now();
        let entries = vec![
            feed_entry("status_log", now - Duration::hours(2)),
            feed_entry("breakdown", now),
            feed_entry("status_log", now - Duration::hours(1)),
        ];

        let feed = merge_activity_feed(entries, 10);
        assert_eq!(feed.len(), 3);
        assert_eq!(feed[0].activity_type, "breakdown");
        assert!(feed[0].happened_at >= feed[1].happened_at);
        assert!(feed[1].happened_at >= feed[2].happened_at);
    }

    #[test]
    fn test_merge_activity_feed_truncates_to_limit() {
        let now = Utc::now();
        let entries: Vec<_> = (0..30)
            .map(|i| feed_entry("status_log", now - Duration::minutes(i)))
            .collect();

        let feed = merge_activity_feed(entries, RECENT_ACTIVITY_LIMIT);
        assert_eq!(feed.len(), RECENT_ACTIVITY_LIMIT);
        // Se quedan las más recientes
        assert_eq!(feed[0].happened_at, now);
    }
}
