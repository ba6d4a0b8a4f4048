//! Modelo de StackingArea
//!
//! Áreas de acopio donde se descarga el material.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado de un área de acopio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackingAreaStatus {
    Active,
    Inactive,
    Full,
}

impl StackingAreaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackingAreaStatus::Active => "active",
            StackingAreaStatus::Inactive => "inactive",
            StackingAreaStatus::Full => "full",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(StackingAreaStatus::Active),
            "inactive" => Some(StackingAreaStatus::Inactive),
            "full" => Some(StackingAreaStatus::Full),
            _ => None,
        }
    }
}

/// StackingArea - mapea exactamente a la tabla stacking_areas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StackingArea {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub capacity: Option<Decimal>,
    pub current_stock: Option<Decimal>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
