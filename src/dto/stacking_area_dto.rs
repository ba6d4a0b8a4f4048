//! DTOs de StackingArea

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::stacking_area::StackingArea;

/// Request para registrar un área de acopio
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStackingAreaRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 255))]
    pub location: Option<String>,

    /// Capacidad máxima en toneladas
    #[validate(range(min = 0.0))]
    pub capacity: Option<f64>,

    pub notes: Option<String>,
}

/// Request para actualizar un área de acopio
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStackingAreaRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 255))]
    pub location: Option<String>,

    #[validate(range(min = 0.0))]
    pub capacity: Option<f64>,

    /// active | inactive | full
    pub status: Option<String>,

    pub notes: Option<String>,
}

/// Response de área de acopio
#[derive(Debug, Serialize)]
pub struct StackingAreaResponse {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub capacity: Option<Decimal>,
    pub current_stock: Option<Decimal>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StackingArea> for StackingAreaResponse {
    fn from(area: StackingArea) -> Self {
        Self {
            id: area.id,
            name: area.name,
            location: area.location,
            capacity: area.capacity,
            current_stock: area.current_stock,
            status: area.status,
            notes: area.notes,
            created_at: area.created_at,
        }
    }
}
