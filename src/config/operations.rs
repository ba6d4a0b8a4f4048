//! Configuración operacional de la mina
//!
//! TTLs de cache y umbrales de monitoreo de combustible. Todos tienen
//! default razonable y se pueden sobreescribir por variable de entorno.

use std::env;

/// Configuración de operaciones
#[derive(Debug, Clone)]
pub struct OperationsConfig {
    /// TTL (segundos) del cache de estado de equipo
    pub cache_ttl_equipment_status: u64,
    /// TTL (segundos) de los agregados del dashboard
    pub cache_ttl_dashboard: u64,
    /// Nivel de combustible (%) bajo el cual se registra warning
    pub fuel_warning_level: f64,
    /// Nivel de combustible (%) bajo el cual se registra error
    pub fuel_critical_level: f64,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            cache_ttl_equipment_status: env_or("CACHE_TTL_EQUIPMENT_STATUS", 300),
            cache_ttl_dashboard: env_or("CACHE_TTL_DASHBOARD", 300),
            fuel_warning_level: env_or("FUEL_WARNING_LEVEL", 20.0),
            fuel_critical_level: env_or("FUEL_CRITICAL_LEVEL", 10.0),
        }
    }
}

fn env_or<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OperationsConfig {
            cache_ttl_equipment_status: 300,
            cache_ttl_dashboard: 300,
            fuel_warning_level: 20.0,
            fuel_critical_level: 10.0,
        };
        assert!(config.fuel_critical_level < config.fuel_warning_level);
        assert_eq!(config.cache_ttl_equipment_status, 300);
    }

    #[test]
    fn test_env_or_ignores_garbage() {
        std::env::set_var("TEST_ENV_OR_GARBAGE", "not-a-number");
        assert_eq!(env_or("TEST_ENV_OR_GARBAGE", 42u64), 42);
        std::env::remove_var("TEST_ENV_OR_GARBAGE");
    }
}
