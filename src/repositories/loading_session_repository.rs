//! Repositorio de LoadingSession
//!
//! El código de sesión (LS-YYYY-MM-DD-NNN) se genera contando las sesiones
//! iniciadas el mismo día, como hacía el panel original.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::models::loading_session::{build_session_code, LoadingSession};
use crate::utils::errors::AppResult;

pub struct LoadingSessionRepository {
    pool: PgPool,
}

impl LoadingSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        stacking_area_id: i64,
        user_id: i64,
        shift: String,
        start_time: DateTime<Utc>,
        notes: Option<String>,
    ) -> AppResult<LoadingSession> {
        let now = Utc::now();

        // Secuencia del día para el código de sesión
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM loading_sessions WHERE start_time::date = $1::date",
        )
        .bind(start_time)
        .fetch_one(&self.pool)
        .await?;

        let session_code = build_session_code(start_time, count.0 + 1);

        let session = sqlx::query_as::<_, LoadingSession>(
            r#"
            INSERT INTO loading_sessions
                (session_code, stacking_area_id, user_id, shift, start_time, end_time,
                 status, total_buckets, total_tonnage, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NULL, 'active', 0, 0, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(session_code)
        .bind(stacking_area_id)
        .bind(user_id)
        .bind(shift)
        .bind(start_time)
        .bind(notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<LoadingSession>> {
        let session =
            sqlx::query_as::<_, LoadingSession>("SELECT * FROM loading_sessions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(session)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<LoadingSession>> {
        let sessions = sqlx::query_as::<_, LoadingSession>(
            "SELECT * FROM loading_sessions ORDER BY start_time DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    /// Cerrar una sesión: status completed/cancelled y end_time
    pub async fn close(
        &self,
        id: i64,
        status: String,
        end_time: DateTime<Utc>,
        notes: Option<String>,
    ) -> AppResult<LoadingSession> {
        let session = sqlx::query_as::<_, LoadingSession>(
            r#"
            UPDATE loading_sessions
            SET status = $2, end_time = $3, notes = COALESCE($4, notes), updated_at = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(end_time)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Recalcular totales desde bucket_activities, en la misma transacción
    /// que la escritura de la actividad
    pub async fn recompute_totals_with<'e, E: PgExecutor<'e>>(
        executor: E,
        session_id: i64,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE loading_sessions
            SET total_buckets = COALESCE((
                    SELECT SUM(bucket_count) FROM bucket_activities WHERE loading_session_id = $1
                ), 0),
                total_tonnage = COALESCE((
                    SELECT SUM(estimated_tonnage) FROM bucket_activities WHERE loading_session_id = $1
                ), 0),
                updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(session_id)
        .bind(Utc::now())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Agregados de producción para el dashboard
    pub async fn production_totals_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<(i64, i64, rust_decimal::Decimal)> {
        let row: (i64, Option<i64>, Option<rust_decimal::Decimal>) = sqlx::query_as(
            r#"
            SELECT COUNT(*), SUM(total_buckets)::bigint, SUM(total_tonnage)
            FROM loading_sessions
            WHERE start_time >= $1 AND start_time < $2 AND status != 'cancelled'
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok((row.0, row.1.unwrap_or(0), row.2.unwrap_or_default()))
    }
}
