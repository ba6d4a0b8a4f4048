//! Modelo de BucketActivity
//!
//! Registro de baldadas excavadora → dumptruck dentro de una sesión de carga.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// BucketActivity - mapea exactamente a la tabla bucket_activities
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BucketActivity {
    pub id: i64,
    pub loading_session_id: i64,
    pub excavator_id: i64,
    pub dumptruck_id: i64,
    pub bucket_count: i32,
    pub estimated_tonnage: Decimal,
    pub activity_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
