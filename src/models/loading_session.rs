//! Modelo de LoadingSession
//!
//! Sesiones de carga por turno y área de acopio. Los totales
//! (total_buckets/total_tonnage) se recalculan desde bucket_activities.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado de una sesión de carga
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(SessionStatus::Active),
            "completed" => Some(SessionStatus::Completed),
            "cancelled" => Some(SessionStatus::Cancelled),
            _ => None,
        }
    }
}

/// LoadingSession - mapea exactamente a la tabla loading_sessions
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoadingSession {
    pub id: i64,
    pub session_code: String,
    pub stacking_area_id: i64,
    pub user_id: i64,
    pub shift: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: String,
    pub total_buckets: i32,
    pub total_tonnage: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LoadingSession {
    /// Duración en minutos: cerrada si hay end_time, en curso si está activa
    pub fn duration_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        match self.end_time {
            Some(end) => Some((end - self.start_time).num_minutes()),
            None if self.status == "active" => Some((now - self.start_time).num_minutes()),
            None => None,
        }
    }
}

/// Generar código de sesión: LS-YYYY-MM-DD-NNN (NNN = secuencia del día)
pub fn build_session_code(date: DateTime<Utc>, sequence: i64) -> String {
    format!("LS-{}-{:03}", date.format("%Y-%m-%d"), sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_build_session_code() {
        let date = Utc.with_ymd_and_hms(2025, 8, 3, 7, 30, 0).unwrap();
        assert_eq!(build_session_code(date, 1), "LS-2025-08-03-001");
        assert_eq!(build_session_code(date, 42), "LS-2025-08-03-042");
        assert_eq!(build_session_code(date, 137), "LS-2025-08-03-137");
    }

    #[test]
    fn test_duration_minutes() {
        let start = Utc.with_ymd_and_hms(2025, 8, 3, 7, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 8, 3, 9, 30, 0).unwrap();
        let session = LoadingSession {
            id: 1,
            session_code: "LS-2025-08-03-001".to_string(),
            stacking_area_id: 1,
            user_id: 1,
            shift: "A".to_string(),
            start_time: start,
            end_time: Some(end),
            status: "completed".to_string(),
            total_buckets: 0,
            total_tonnage: Decimal::ZERO,
            notes: None,
            created_at: start,
            updated_at: end,
        };
        assert_eq!(session.duration_minutes(end), Some(150));

        let open = LoadingSession {
            end_time: None,
            status: "active".to_string(),
            ..session.clone()
        };
        assert_eq!(open.duration_minutes(end), Some(150));

        let cancelled = LoadingSession {
            end_time: None,
            status: "cancelled".to_string(),
            ..session
        };
        assert_eq!(cancelled.duration_minutes(end), None);
    }
}
