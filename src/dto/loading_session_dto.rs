//! DTOs de LoadingSession

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::loading_session::LoadingSession;

/// Request para iniciar una sesión de carga
#[derive(Debug, Deserialize, Validate)]
pub struct StartSessionRequest {
    pub stacking_area_id: i64,

    pub user_id: i64,

    /// Turno A | B | C
    #[validate(length(min = 1, max = 1))]
    pub shift: String,

    /// Default: now
    pub start_time: Option<DateTime<Utc>>,

    pub notes: Option<String>,
}

/// Request para cerrar (o cancelar) una sesión de carga
#[derive(Debug, Deserialize, Validate)]
pub struct CloseSessionRequest {
    /// completed (default) | cancelled
    pub status: Option<String>,

    /// Default: now
    pub end_time: Option<DateTime<Utc>>,

    pub notes: Option<String>,
}

/// Response de sesión de carga con duración derivada
#[derive(Debug, Serialize)]
pub struct LoadingSessionResponse {
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
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LoadingSession> for LoadingSessionResponse {
    fn from(session: LoadingSession) -> Self {
        let duration_minutes = session.duration_minutes(Utc::now());
        Self {
            id: session.id,
            session_code: session.session_code,
            stacking_area_id: session.stacking_area_id,
            user_id: session.user_id,
            shift: session.shift,
            start_time: session.start_time,
            end_time: session.end_time,
            status: session.status,
            total_buckets: session.total_buckets,
            total_tonnage: session.total_tonnage,
            duration_minutes,
            notes: session.notes,
            created_at: session.created_at,
        }
    }
}
