//! Modelo de EquipmentBreakdown
//!
//! Este módulo contiene el struct EquipmentBreakdown y sus enums de dominio.
//! El ciclo de vida (ongoing/pending_parts/repaired) se maneja como máquina
//! de estados explícita en `services::breakdown_lifecycle`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Categoría de avería
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownType {
    Mechanical,
    Electrical,
    Hydraulic,
    Engine,
    Tire,
    Other,
}

impl BreakdownType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakdownType::Mechanical => "mechanical",
            BreakdownType::Electrical => "electrical",
            BreakdownType::Hydraulic => "hydraulic",
            BreakdownType::Engine => "engine",
            BreakdownType::Tire => "tire",
            BreakdownType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mechanical" => Some(BreakdownType::Mechanical),
            "electrical" => Some(BreakdownType::Electrical),
            "hydraulic" => Some(BreakdownType::Hydraulic),
            "engine" => Some(BreakdownType::Engine),
            "tire" => Some(BreakdownType::Tire),
            "other" => Some(BreakdownType::Other),
            _ => None,
        }
    }
}

/// Severidad de la avería
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BreakdownSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakdownSeverity::Low => "low",
            BreakdownSeverity::Medium => "medium",
            BreakdownSeverity::High => "high",
            BreakdownSeverity::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(BreakdownSeverity::Low),
            "medium" => Some(BreakdownSeverity::Medium),
            "high" => Some(BreakdownSeverity::High),
            "critical" => Some(BreakdownSeverity::Critical),
            _ => None,
        }
    }
}

/// Estado del ciclo de vida de una avería
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownStatus {
    Ongoing,
    PendingParts,
    Repaired,
}

impl BreakdownStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakdownStatus::Ongoing => "ongoing",
            BreakdownStatus::PendingParts => "pending_parts",
            BreakdownStatus::Repaired => "repaired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ongoing" => Some(BreakdownStatus::Ongoing),
            "pending_parts" => Some(BreakdownStatus::PendingParts),
            "repaired" => Some(BreakdownStatus::Repaired),
            _ => None,
        }
    }

    /// Una avería activa (ongoing/pending_parts) fuerza el estado derivado
    /// del equipo a `breakdown`
    pub fn is_active(&self) -> bool {
        matches!(self, BreakdownStatus::Ongoing | BreakdownStatus::PendingParts)
    }
}

/// EquipmentBreakdown - mapea exactamente a la tabla equipment_breakdowns
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EquipmentBreakdown {
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
    pub updated_at: DateTime<Utc>,
}

impl EquipmentBreakdown {
    pub fn is_active(&self) -> bool {
        BreakdownStatus::parse(&self.status).map_or(false, |s| s.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_status_is_active() {
        assert!(BreakdownStatus::Ongoing.is_active());
        assert!(BreakdownStatus::PendingParts.is_active());
        assert!(!BreakdownStatus::Repaired.is_active());
    }

    #[test]
    fn test_breakdown_status_parse() {
        assert_eq!(BreakdownStatus::parse("pending_parts"), Some(BreakdownStatus::PendingParts));
        assert_eq!(BreakdownStatus::parse("fixed"), None);
    }

    #[test]
    fn test_breakdown_type_parse() {
        assert_eq!(BreakdownType::parse("hydraulic"), Some(BreakdownType::Hydraulic));
        assert_eq!(BreakdownType::parse("software"), None);
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(BreakdownSeverity::parse("critical"), Some(BreakdownSeverity::Critical));
        assert_eq!(BreakdownSeverity::parse("urgent"), None);
    }
}
