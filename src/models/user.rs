//! Modelo de User
//!
//! Usuarios del panel: superadmin, mcr (operación) y manager (dashboard).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Rol del usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Superadmin,
    Mcr,
    Manager,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Superadmin => "superadmin",
            UserRole::Mcr => "mcr",
            UserRole::Manager => "manager",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "superadmin" => Some(UserRole::Superadmin),
            "mcr" => Some(UserRole::Mcr),
            "manager" => Some(UserRole::Manager),
            _ => None,
        }
    }

    /// Acceso al dashboard de analítica
    pub fn can_view_dashboard(&self) -> bool {
        matches!(self, UserRole::Superadmin | UserRole::Manager)
    }
}

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub shift: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("manager"), Some(UserRole::Manager));
        assert_eq!(UserRole::parse("operator"), None);
    }

    #[test]
    fn test_dashboard_access() {
        assert!(UserRole::Superadmin.can_view_dashboard());
        assert!(UserRole::Manager.can_view_dashboard());
        assert!(!UserRole::Mcr.can_view_dashboard());
    }
}
