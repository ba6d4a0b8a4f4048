//! Repositorio de EquipmentBreakdown
//!
//! Acceso SQL a `equipment_breakdowns`. Las variantes `*_with` aceptan un
//! executor explícito: el ciclo de vida de averías escribe la avería y su
//! status log acompañante en la misma transacción.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor, PgPool};

use crate::models::breakdown::EquipmentBreakdown;
use crate::utils::errors::AppResult;

/// Avería con el código del equipo, para el feed del dashboard
#[derive(Debug, Clone, FromRow)]
pub struct BreakdownWithEquipment {
    pub equipment_id: i64,
    pub equipment_code: String,
    pub breakdown_type: String,
    pub description: String,
    pub severity: String,
    pub status: String,
    pub start_time: DateTime<Utc>,
}

/// Datos para registrar una nueva avería
#[derive(Debug, Clone)]
pub struct NewBreakdown {
    pub equipment_id: i64,
    pub loading_session_id: Option<i64>,
    pub breakdown_type: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub severity: String,
    pub repair_cost: Decimal,
    /// Estado inicial: `ongoing`, o `pending_parts` si se indica explícito
    pub status: String,
    pub reported_by: i64,
}

/// Campos actualizables de una avería
#[derive(Debug, Clone)]
pub struct BreakdownChanges {
    pub breakdown_type: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub severity: String,
    pub repair_cost: Decimal,
    pub repaired_by: Option<String>,
    pub status: String,
}

pub struct BreakdownRepository {
    pool: PgPool,
}

impl BreakdownRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert_with<'e, E: PgExecutor<'e>>(
        executor: E,
        new: &NewBreakdown,
    ) -> AppResult<EquipmentBreakdown> {
        let now = Utc::now();

        let breakdown = sqlx::query_as::<_, EquipmentBreakdown>(
            r#"
            INSERT INTO equipment_breakdowns
                (equipment_id, loading_session_id, breakdown_type, description,
                 start_time, end_time, duration_minutes, severity, repair_cost,
                 repaired_by, status, reported_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NULL, $10, $11, $12, $12)
            RETURNING *
            "#,
        )
        .bind(new.equipment_id)
        .bind(new.loading_session_id)
        .bind(&new.breakdown_type)
        .bind(&new.description)
        .bind(new.start_time)
        .bind(new.end_time)
        .bind(new.duration_minutes)
        .bind(&new.severity)
        .bind(new.repair_cost)
        .bind(&new.status)
        .bind(new.reported_by)
        .bind(now)
        .fetch_one(executor)
        .await?;

        Ok(breakdown)
    }

    pub async fn update_with<'e, E: PgExecutor<'e>>(
        executor: E,
        id: i64,
        changes: &BreakdownChanges,
    ) -> AppResult<EquipmentBreakdown> {
        let breakdown = sqlx::query_as::<_, EquipmentBreakdown>(
            r#"
            UPDATE equipment_breakdowns
            SET breakdown_type = $2, description = $3, start_time = $4, end_time = $5,
                duration_minutes = $6, severity = $7, repair_cost = $8,
                repaired_by = $9, status = $10, updated_at = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.breakdown_type)
        .bind(&changes.description)
        .bind(changes.start_time)
        .bind(changes.end_time)
        .bind(changes.duration_minutes)
        .bind(&changes.severity)
        .bind(changes.repair_cost)
        .bind(&changes.repaired_by)
        .bind(&changes.status)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(breakdown)
    }

    pub async fn delete_with<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM equipment_breakdowns WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<EquipmentBreakdown>> {
        let breakdown =
            sqlx::query_as::<_, EquipmentBreakdown>("SELECT * FROM equipment_breakdowns WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(breakdown)
    }

    /// Existe alguna avería activa (ongoing/pending_parts) para el equipo
    pub async fn has_active_for_equipment(&self, equipment_id: i64) -> AppResult<bool> {
        Self::has_active_with(&self.pool, equipment_id, None).await
    }

    /// Variante transaccional, con exclusión opcional de una avería (la que
    /// se está reparando o borrando)
    pub async fn has_active_with<'e, E: PgExecutor<'e>>(
        executor: E,
        equipment_id: i64,
        excluding_id: Option<i64>,
    ) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM equipment_breakdowns
                WHERE equipment_id = $1
                  AND status IN ('ongoing', 'pending_parts')
                  AND ($2::bigint IS NULL OR id != $2)
            )
            "#,
        )
        .bind(equipment_id)
        .bind(excluding_id)
        .fetch_one(executor)
        .await?;

        Ok(result.0)
    }

    /// Avería activa más reciente por start_time (desempate por id).
    /// Puede haber varias activas a la vez; el resolver solo expone esta.
    pub async fn latest_active_for_equipment(
        &self,
        equipment_id: i64,
    ) -> AppResult<Option<EquipmentBreakdown>> {
        let breakdown = sqlx::query_as::<_, EquipmentBreakdown>(
            r#"
            SELECT * FROM equipment_breakdowns
            WHERE equipment_id = $1 AND status IN ('ongoing', 'pending_parts')
            ORDER BY start_time DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(breakdown)
    }

    pub async fn list_for_equipment(
        &self,
        equipment_id: i64,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<EquipmentBreakdown>> {
        let breakdowns = sqlx::query_as::<_, EquipmentBreakdown>(
            r#"
            SELECT * FROM equipment_breakdowns
            WHERE equipment_id = $1
            ORDER BY start_time DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(equipment_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(breakdowns)
    }

    /// Últimas averías de toda la flota - para el feed de actividad reciente
    pub async fn recent_across_fleet(&self, limit: i64) -> AppResult<Vec<BreakdownWithEquipment>> {
        let breakdowns = sqlx::query_as::<_, BreakdownWithEquipment>(
            r#"
            SELECT b.equipment_id, e.code AS equipment_code, b.breakdown_type,
                   b.description, b.severity, b.status, b.start_time
            FROM equipment_breakdowns b
            JOIN equipment e ON e.id = b.equipment_id
            ORDER BY b.start_time DESC, b.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(breakdowns)
    }

    /// Averías activas con severidad crítica - para el resumen del dashboard
    pub async fn count_active_critical(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM equipment_breakdowns
            WHERE status IN ('ongoing', 'pending_parts') AND severity = 'critical'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Averías iniciadas dentro de un rango - para métricas del dashboard
    pub async fn count_started_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM equipment_breakdowns WHERE start_time >= $1 AND start_time < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}
