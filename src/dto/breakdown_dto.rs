//! DTOs de EquipmentBreakdown

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::breakdown::EquipmentBreakdown;

/// Request para reportar una avería
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBreakdownRequest {
    pub equipment_id: i64,

    pub loading_session_id: Option<i64>,

    /// mechanical | electrical | hydraulic | engine | tire | other
    pub breakdown_type: String,

    #[validate(length(min = 5, max = 2000))]
    pub description: String,

    pub start_time: DateTime<Utc>,

    pub end_time: Option<DateTime<Utc>>,

    /// low | medium | high | critical (default medium)
    pub severity: Option<String>,

    #[validate(range(min = 0.0))]
    pub repair_cost: Option<f64>,

    /// Estado inicial: ongoing (default) o pending_parts
    pub status: Option<String>,

    pub reported_by: i64,
}

/// Request para actualizar una avería (reparación, reapertura, corrección)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBreakdownRequest {
    pub breakdown_type: Option<String>,

    #[validate(length(min = 5, max = 2000))]
    pub description: Option<String>,

    pub start_time: Option<DateTime<Utc>>,

    pub end_time: Option<DateTime<Utc>>,

    pub severity: Option<String>,

    #[validate(range(min = 0.0))]
    pub repair_cost: Option<f64>,

    #[validate(length(min = 2, max = 255))]
    pub repaired_by: Option<String>,

    /// ongoing | pending_parts | repaired
    pub status: Option<String>,
}

/// Response de avería
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub id: i64,
    pub equipment_id: i64,
    pub loading_session_id: Option<i64>,
    pub breakdown_type: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub severity: String,
    pub repair_cost: Decimal,
    pub repaired_by: Option<String>,
    pub status: String,
    pub reported_by: i64,
    pub created_at: DateTime<Utc>,
}

impl From<EquipmentBreakdown> for BreakdownResponse {
    fn from(breakdown: EquipmentBreakdown) -> Self {
        Self {
            id: breakdown.id,
            equipment_id: breakdown.equipment_id,
            loading_session_id: breakdown.loading_session_id,
            breakdown_type: breakdown.breakdown_type,
            description: breakdown.description,
            start_time: breakdown.start_time,
            end_time: breakdown.end_time,
            duration_minutes: breakdown.duration_minutes,
            severity: breakdown.severity,
            repair_cost: breakdown.repair_cost,
            repaired_by: breakdown.repaired_by,
            status: breakdown.status,
            reported_by: breakdown.reported_by,
            created_at: breakdown.created_at,
        }
    }
}
