//! DTOs de BucketActivity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::bucket_activity::BucketActivity;

/// Request para registrar baldadas dentro de una sesión
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBucketActivityRequest {
    pub loading_session_id: i64,

    pub excavator_id: i64,

    pub dumptruck_id: i64,

    #[validate(range(min = 1, max = 100))]
    pub bucket_count: i32,

    #[validate(range(min = 0.0))]
    pub estimated_tonnage: f64,

    /// Default: now
    pub activity_time: Option<DateTime<Utc>>,

    pub notes: Option<String>,
}

/// Response de actividad de baldadas
#[derive(Debug, Serialize)]
pub struct BucketActivityResponse {
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

impl From<BucketActivity> for BucketActivityResponse {
    fn from(activity: BucketActivity) -> Self {
        Self {
            id: activity.id,
            loading_session_id: activity.loading_session_id,
            excavator_id: activity.excavator_id,
            dumptruck_id: activity.dumptruck_id,
            bucket_count: activity.bucket_count,
            estimated_tonnage: activity.estimated_tonnage,
            activity_time: activity.activity_time,
            notes: activity.notes,
            created_at: activity.created_at,
        }
    }
}
