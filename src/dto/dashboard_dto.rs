//! DTOs del dashboard de analítica

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::repositories::breakdown_repository::BreakdownWithEquipment;
use crate::repositories::status_log_repository::StatusLogWithEquipment;

/// Fila del tablero de estado operacional por equipo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentBoardEntry {
    pub equipment_id: i64,
    pub code: String,
    pub equipment_type: String,
    pub current_status: String,
    pub status_color: String,
    pub can_work: bool,
    pub breakdown_reason: Option<String>,
}

/// Resumen agregado de la flota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentSummary {
    pub total_equipment: i64,
    /// Distribución por estado operacional (idle/working/breakdown/maintenance)
    pub by_status: BTreeMap<String, i64>,
    /// Distribución por tipo (dumptruck/excavator)
    pub by_type: BTreeMap<String, i64>,
    pub critical_breakdowns: i64,
    pub low_fuel_count: i64,
}

/// Entrada del feed de actividad reciente de la flota: status logs y
/// averías mezclados en orden cronológico inverso
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentActivityEntry {
    /// `status_log` | `breakdown`
    pub activity_type: String,
    pub equipment_id: i64,
    pub equipment_code: String,
    pub status: String,
    pub severity: Option<String>,
    pub detail: Option<String>,
    pub happened_at: DateTime<Utc>,
}

impl From<StatusLogWithEquipment> for RecentActivityEntry {
    fn from(log: StatusLogWithEquipment) -> Self {
        Self {
            activity_type: "status_log".to_string(),
            equipment_id: log.equipment_id,
            equipment_code: log.equipment_code,
            status: log.status,
            severity: None,
            detail: log.notes.or(log.operator_name),
            happened_at: log.status_time,
        }
    }
}

impl From<BreakdownWithEquipment> for RecentActivityEntry {
    fn from(breakdown: BreakdownWithEquipment) -> Self {
        Self {
            activity_type: "breakdown".to_string(),
            equipment_id: breakdown.equipment_id,
            equipment_code: breakdown.equipment_code,
            status: breakdown.status,
            severity: Some(breakdown.severity),
            detail: Some(format!(
                "{}: {}",
                breakdown.breakdown_type, breakdown.description
            )),
            happened_at: breakdown.start_time,
        }
    }
}

/// Métricas de producción para un rango (today/week/month)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionMetrics {
    pub range: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_sessions: i64,
    pub total_buckets: i64,
    pub total_tonnage: Decimal,
    pub breakdowns_reported: i64,
}
