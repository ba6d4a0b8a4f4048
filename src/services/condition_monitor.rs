//! Monitor de condiciones críticas
//!
//! Detección-only: niveles de combustible cruzando umbrales y averías de
//! severidad crítica generan warnings estructurados en el log. Nunca se
//! bloquea una escritura ni se lanza error.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{error, warn};

use crate::config::OperationsConfig;
use crate::models::breakdown::EquipmentBreakdown;
use crate::models::status_log::EquipmentStatusLog;

/// Condición detectada en un status log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Combustible por debajo del umbral de warning
    FuelWarning,
    /// Combustible por debajo del umbral crítico
    FuelCritical,
    /// El estado cayó a breakdown
    StatusBreakdown,
}

/// Evaluar un status log recién creado contra los umbrales configurados.
/// `previous_fuel_level` permite detectar el cruce (no solo el valor bajo):
/// solo se reporta cuando el nivel anterior estaba por encima del umbral o
/// no se conocía.
pub fn evaluate_status_log(
    log: &EquipmentStatusLog,
    previous_fuel_level: Option<Decimal>,
    config: &OperationsConfig,
) -> Vec<Condition> {
    let mut conditions = Vec::new();

    if let Some(fuel) = log.fuel_level.and_then(|f| f.to_f64()) {
        let previous = previous_fuel_level.and_then(|f| f.to_f64());
        let crossed = |threshold: f64| fuel < threshold && previous.map_or(true, |p| p >= threshold);

        if crossed(config.fuel_critical_level) {
            conditions.push(Condition::FuelCritical);
        } else if crossed(config.fuel_warning_level) {
            conditions.push(Condition::FuelWarning);
        }
    }

    if log.status == "breakdown" {
        conditions.push(Condition::StatusBreakdown);
    }

    conditions
}

/// Emitir las condiciones detectadas al log estructurado
pub fn report_conditions(log: &EquipmentStatusLog, conditions: &[Condition]) {
    for condition in conditions {
        match condition {
            Condition::FuelCritical => error!(
                equipment_id = log.equipment_id,
                fuel_level = ?log.fuel_level,
                "Nivel de combustible crítico"
            ),
            Condition::FuelWarning => warn!(
                equipment_id = log.equipment_id,
                fuel_level = ?log.fuel_level,
                "Nivel de combustible bajo el umbral de warning"
            ),
            Condition::StatusBreakdown => warn!(
                equipment_id = log.equipment_id,
                status_log_id = log.id,
                "Equipo cayó a estado breakdown"
            ),
        }
    }
}

/// Warning por avería de severidad crítica - detección-only
pub fn report_breakdown_severity(breakdown: &EquipmentBreakdown) {
    if breakdown.severity == "critical" {
        warn!(
            equipment_id = breakdown.equipment_id,
            breakdown_id = breakdown.id,
            breakdown_type = %breakdown.breakdown_type,
            "Avería con severidad crítica reportada"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_config() -> OperationsConfig {
        OperationsConfig {
            cache_ttl_equipment_status: 300,
            cache_ttl_dashboard: 300,
            fuel_warning_level: 20.0,
            fuel_critical_level: 10.0,
        }
    }

    fn log_with(status: &str, fuel: Option<Decimal>) -> EquipmentStatusLog {
        let now = Utc::now();
        EquipmentStatusLog {
            id: 1,
            equipment_id: 1,
            status: status.to_string(),
            loading_session_id: None,
            location: None,
            operator_name: None,
            fuel_level: fuel,
            engine_hours: None,
            status_time: now,
            notes: None,
            created_at: now,
        }
    }

    #[test]
    fn test_fuel_crossing_warning_threshold() {
        let log = log_with("working", Some(Decimal::new(155, 1))); // 15.5%
        let conditions = evaluate_status_log(&log, Some(Decimal::from(40)), &test_config());
        assert_eq!(conditions, vec![Condition::FuelWarning]);
    }

    #[test]
    fn test_fuel_crossing_critical_threshold() {
        let log = log_with("working", Some(Decimal::from(5)));
        let conditions = evaluate_status_log(&log, Some(Decimal::from(15)), &test_config());
        assert_eq!(conditions, vec![Condition::FuelCritical]);
    }

    #[test]
    fn test_fuel_already_below_threshold_not_repeated() {
        // Ya estaba bajo el umbral: no es un cruce, no se repite el warning
        let log = log_with("working", Some(Decimal::from(15)));
        let conditions = evaluate_status_log(&log, Some(Decimal::from(14)), &test_config());
        assert!(conditions.is_empty());
    }

    #[test]
    fn test_unknown_previous_fuel_reports() {
        let log = log_with("working", Some(Decimal::from(8)));
        let conditions = evaluate_status_log(&log, None, &test_config());
        assert_eq!(conditions, vec![Condition::FuelCritical]);
    }

    #[test]
    fn test_breakdown_status_detected() {
        let log = log_with("breakdown", None);
        let conditions = evaluate_status_log(&log, None, &test_config());
        assert_eq!(conditions, vec![Condition::StatusBreakdown]);
    }

    #[test]
    fn test_healthy_log_no_conditions() {
        let log = log_with("working", Some(Decimal::from(80)));
        assert!(evaluate_status_log(&log, Some(Decimal::from(85)), &test_config()).is_empty());
    }
}
