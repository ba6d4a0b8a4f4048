//! Repositorio de BucketActivity
//!
//! Cada escritura recalcula los totales de la sesión dueña; el controller
//! envuelve ambas operaciones en una transacción.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};

use crate::models::bucket_activity::BucketActivity;
use crate::utils::errors::AppResult;

pub struct BucketActivityRepository {
    pool: PgPool,
}

impl BucketActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_with<'e, E: PgExecutor<'e>>(
        executor: E,
        loading_session_id: i64,
        excavator_id: i64,
        dumptruck_id: i64,
        bucket_count: i32,
        estimated_tonnage: Decimal,
        activity_time: DateTime<Utc>,
        notes: Option<String>,
    ) -> AppResult<BucketActivity> {
        let activity = sqlx::query_as::<_, BucketActivity>(
            r#"
            INSERT INTO bucket_activities
                (loading_session_id, excavator_id, dumptruck_id, bucket_count,
                 estimated_tonnage, activity_time, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(loading_session_id)
        .bind(excavator_id)
        .bind(dumptruck_id)
        .bind(bucket_count)
        .bind(estimated_tonnage)
        .bind(activity_time)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(activity)
    }

    pub async fn delete_with<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM bucket_activities WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<BucketActivity>> {
        let activity =
            sqlx::query_as::<_, BucketActivity>("SELECT * FROM bucket_activities WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(activity)
    }

    pub async fn list_by_session(&self, session_id: i64) -> AppResult<Vec<BucketActivity>> {
        let activities = sqlx::query_as::<_, BucketActivity>(
            r#"
            SELECT * FROM bucket_activities
            WHERE loading_session_id = $1
            ORDER BY activity_time DESC, id DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }
}
