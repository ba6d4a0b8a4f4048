//! DTOs de EquipmentStatusLog

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::status_log::EquipmentStatusLog;

/// Request para registrar un status log operacional
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStatusLogRequest {
    pub equipment_id: i64,

    /// idle | working | breakdown | maintenance
    pub status: String,

    pub loading_session_id: Option<i64>,

    #[validate(length(min = 2, max = 255))]
    pub location: Option<String>,

    #[validate(length(min = 2, max = 255))]
    pub operator_name: Option<String>,

    /// Porcentaje 0-100
    #[validate(range(min = 0.0, max = 100.0))]
    pub fuel_level: Option<f64>,

    #[validate(range(min = 0.0))]
    pub engine_hours: Option<f64>,

    /// Default: now
    pub status_time: Option<DateTime<Utc>>,

    pub notes: Option<String>,
}

/// Request para actualización masiva de estados (fin de turno)
#[derive(Debug, Deserialize, Validate)]
pub struct BulkStatusLogRequest {
    /// Cada entrada se valida individualmente en el controller
    #[validate(length(min = 1, max = 100))]
    pub entries: Vec<CreateStatusLogRequest>,
}

/// Response de status log
#[derive(Debug, Serialize)]
pub struct StatusLogResponse {
    pub id: i64,
    pub equipment_id: i64,
    pub status: String,
    pub loading_session_id: Option<i64>,
    pub location: Option<String>,
    pub operator_name: Option<String>,
    pub fuel_level: Option<Decimal>,
    pub engine_hours: Option<Decimal>,
    pub status_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EquipmentStatusLog> for StatusLogResponse {
    fn from(log: EquipmentStatusLog) -> Self {
        Self {
            id: log.id,
            equipment_id: log.equipment_id,
            status: log.status,
            loading_session_id: log.loading_session_id,
            location: log.location,
            operator_name: log.operator_name,
            fuel_level: log.fuel_level,
            engine_hours: log.engine_hours,
            status_time: log.status_time,
            notes: log.notes,
            created_at: log.created_at,
        }
    }
}
