//! Modelo de EquipmentStatusLog
//!
//! Historial append-only de estados operacionales por equipo. Las filas
//! nunca se actualizan en el flujo normal, solo se insertan (la corrección
//! administrativa es la única excepción).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado operacional de un equipo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalStatus {
    Idle,
    Working,
    Breakdown,
    Maintenance,
}

impl OperationalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalStatus::Idle => "idle",
            OperationalStatus::Working => "working",
            OperationalStatus::Breakdown => "breakdown",
            OperationalStatus::Maintenance => "maintenance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "idle" => Some(OperationalStatus::Idle),
            "working" => Some(OperationalStatus::Working),
            "breakdown" => Some(OperationalStatus::Breakdown),
            "maintenance" => Some(OperationalStatus::Maintenance),
            _ => None,
        }
    }

    /// Color para los widgets del dashboard
    pub fn color(&self) -> &'static str {
        match self {
            OperationalStatus::Working => "success",
            OperationalStatus::Idle => "warning",
            OperationalStatus::Breakdown => "danger",
            OperationalStatus::Maintenance => "info",
        }
    }
}

/// EquipmentStatusLog - mapea exactamente a la tabla equipment_status_log
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EquipmentStatusLog {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operational_status_parse() {
        assert_eq!(OperationalStatus::parse("idle"), Some(OperationalStatus::Idle));
        assert_eq!(OperationalStatus::parse("working"), Some(OperationalStatus::Working));
        assert_eq!(OperationalStatus::parse("breakdown"), Some(OperationalStatus::Breakdown));
        assert_eq!(OperationalStatus::parse("maintenance"), Some(OperationalStatus::Maintenance));
        assert_eq!(OperationalStatus::parse("parked"), None);
    }

    #[test]
    fn test_operational_status_color() {
        assert_eq!(OperationalStatus::Working.color(), "success");
        assert_eq!(OperationalStatus::Breakdown.color(), "danger");
    }
}
