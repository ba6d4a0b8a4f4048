//! Modelo de Equipment
//!
//! Este módulo contiene el struct Equipment y sus enums de dominio.
//! Mapea exactamente a la tabla `equipment` con primary key `id`.
//!
//! El estado administrativo (`status`: active/inactive/maintenance) es
//! independiente del estado operacional derivado (idle/working/breakdown/
//! maintenance), que se calcula en `services::status_resolver`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Tipo de equipo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentType {
    Dumptruck,
    Excavator,
}

impl EquipmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Dumptruck => "dumptruck",
            EquipmentType::Excavator => "excavator",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dumptruck" => Some(EquipmentType::Dumptruck),
            "excavator" => Some(EquipmentType::Excavator),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EquipmentType::Dumptruck => "Dump Truck",
            EquipmentType::Excavator => "Excavator",
        }
    }

    /// Unidad de capacidad: toneladas para dumptruck, m³ para excavator
    pub fn capacity_unit(&self) -> &'static str {
        match self {
            EquipmentType::Dumptruck => "ton",
            EquipmentType::Excavator => "m3",
        }
    }
}

/// Estado administrativo del equipo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    Active,
    Inactive,
    Maintenance,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "active",
            EquipmentStatus::Inactive => "inactive",
            EquipmentStatus::Maintenance => "maintenance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(EquipmentStatus::Active),
            "inactive" => Some(EquipmentStatus::Inactive),
            "maintenance" => Some(EquipmentStatus::Maintenance),
            _ => None,
        }
    }
}

/// Equipment principal - mapea exactamente a la tabla equipment
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Equipment {
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
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_type_roundtrip() {
        assert_eq!(EquipmentType::parse("dumptruck"), Some(EquipmentType::Dumptruck));
        assert_eq!(EquipmentType::parse("excavator"), Some(EquipmentType::Excavator));
        assert_eq!(EquipmentType::parse("bulldozer"), None);
        assert_eq!(EquipmentType::Dumptruck.as_str(), "dumptruck");
    }

    #[test]
    fn test_capacity_unit() {
        assert_eq!(EquipmentType::Dumptruck.capacity_unit(), "ton");
        assert_eq!(EquipmentType::Excavator.capacity_unit(), "m3");
    }

    #[test]
    fn test_equipment_status_parse() {
        assert_eq!(EquipmentStatus::parse("active"), Some(EquipmentStatus::Active));
        assert_eq!(EquipmentStatus::parse("retired"), None);
    }
}
