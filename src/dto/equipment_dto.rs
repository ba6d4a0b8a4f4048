//! DTOs de Equipment

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::breakdown::EquipmentBreakdown;
use crate::models::equipment::Equipment;

/// Request para registrar un equipo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEquipmentRequest {
    /// Formato XX-000 (DT-001, EX-002); se valida con regex en el controller
    #[validate(length(min = 5, max = 50))]
    pub code: String,

    /// dumptruck | excavator
    pub equipment_type: String,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 0.0))]
    pub capacity: Option<f64>,

    #[validate(range(min = 1950, max = 2035))]
    pub year_manufacture: Option<i32>,

    pub notes: Option<String>,
}

/// Request para actualizar un equipo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEquipmentRequest {
    #[validate(length(min = 5, max = 50))]
    pub code: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 0.0))]
    pub capacity: Option<f64>,

    #[validate(range(min = 1950, max = 2035))]
    pub year_manufacture: Option<i32>,

    /// active | inactive | maintenance (estado administrativo)
    pub status: Option<String>,

    pub notes: Option<String>,
}

/// Filtros para listados de equipos
#[derive(Debug, Default, Deserialize)]
pub struct EquipmentFiltersQuery {
    pub equipment_type: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de equipo
#[derive(Debug, Serialize)]
pub struct EquipmentResponse {
    pub id: i64,
    pub code: String,
    pub equipment_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub capacity: Option<Decimal>,
    pub year_manufacture: Option<i32>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Equipment> for EquipmentResponse {
    fn from(equipment: Equipment) -> Self {
        Self {
            id: equipment.id,
            code: equipment.code,
            equipment_type: equipment.equipment_type,
            brand: equipment.brand,
            model: equipment.model,
            capacity: equipment.capacity,
            year_manufacture: equipment.year_manufacture,
            status: equipment.status,
            notes: equipment.notes,
            created_at: equipment.created_at,
        }
    }
}

/// Estado operacional derivado - las cuatro salidas del resolver
#[derive(Debug, Serialize)]
pub struct EquipmentStatusResponse {
    pub equipment_id: i64,
    pub code: String,
    pub current_status: String,
    pub status_color: String,
    pub can_work: bool,
    pub breakdown_reason: Option<String>,
    pub active_breakdown: Option<ActiveBreakdownInfo>,
}

/// Detalle de la avería activa para widgets
#[derive(Debug, Serialize)]
pub struct ActiveBreakdownInfo {
    pub id: i64,
    pub breakdown_type: String,
    pub severity: String,
    pub description: String,
    pub status: String,
    pub start_time: DateTime<Utc>,
}

impl From<EquipmentBreakdown> for ActiveBreakdownInfo {
    fn from(breakdown: EquipmentBreakdown) -> Self {
        Self {
            id: breakdown.id,
            breakdown_type: breakdown.breakdown_type,
            severity: breakdown.severity,
            description: breakdown.description,
            status: breakdown.status,
            start_time: breakdown.start_time,
        }
    }
}
