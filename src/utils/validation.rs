//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! que no se pueden expresar con los derives de `validator`.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Formato de código de equipo: DT-001, EX-002, etc.
    static ref EQUIPMENT_CODE_RE: Regex = Regex::new(r"^[A-Z]{2,4}-\d{3}$").unwrap();
}

/// Validar formato de código de equipo
pub fn validate_equipment_code(value: &str) -> Result<(), ValidationError> {
    if !EQUIPMENT_CODE_RE.is_match(value) {
        let mut error = ValidationError::new("equipment_code");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"XX-000".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que end_time no sea anterior a start_time.
/// Se rechaza antes de persistir, nunca se ajusta silenciosamente.
pub fn validate_time_order(
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    if let Some(end) = end_time {
        if end < start_time {
            let mut error = ValidationError::new("time_order");
            error.add_param("start_time".into(), &start_time.to_rfc3339());
            error.add_param("end_time".into(), &end.to_rfc3339());
            return Err(error);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_equipment_code() {
        assert!(validate_equipment_code("DT-001").is_ok());
        assert!(validate_equipment_code("EX-002").is_ok());
        assert!(validate_equipment_code("DOZR-010").is_ok());
        assert!(validate_equipment_code("dt-001").is_err());
        assert!(validate_equipment_code("DT001").is_err());
        assert!(validate_equipment_code("DT-1").is_err());
    }

    #[test]
    fn test_validate_time_order() {
        let start = Utc::now();
        assert!(validate_time_order(start, None).is_ok());
        assert!(validate_time_order(start, Some(start)).is_ok());
        assert!(validate_time_order(start, Some(start + Duration::minutes(30))).is_ok());
        assert!(validate_time_order(start, Some(start - Duration::minutes(1))).is_err());
    }
}
