//! Repositorio de EquipmentStatusLog
//!
//! Inserciones append-only y consulta del último log por equipo. Las
//! variantes `*_with` aceptan un executor explícito para poder participar
//! en la misma transacción que la escritura que las dispara.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgExecutor, PgPool};

use crate::models::status_log::EquipmentStatusLog;
use crate::utils::errors::AppResult;

/// Status log con el código del equipo, para el feed del dashboard
#[derive(Debug, Clone, FromRow)]
pub struct StatusLogWithEquipment {
    pub equipment_id: i64,
    pub equipment_code: String,
    pub status: String,
    pub operator_name: Option<String>,
    pub notes: Option<String>,
    pub status_time: DateTime<Utc>,
}

/// Datos para insertar un nuevo status log
#[derive(Debug, Clone)]
pub struct NewStatusLog {
    pub equipment_id: i64,
    pub status: String,
    pub loading_session_id: Option<i64>,
    pub location: Option<String>,
    pub operator_name: Option<String>,
    pub fuel_level: Option<Decimal>,
    pub engine_hours: Option<Decimal>,
    pub status_time: DateTime<Utc>,
    pub notes: Option<String>,
}

impl NewStatusLog {
    /// Entrada mínima generada por el sistema (ciclo de vida de averías)
    pub fn system_entry(
        equipment_id: i64,
        status: &str,
        loading_session_id: Option<i64>,
        status_time: DateTime<Utc>,
        notes: String,
    ) -> Self {
        Self {
            equipment_id,
            status: status.to_string(),
            loading_session_id,
            location: None,
            operator_name: None,
            fuel_level: None,
            engine_hours: None,
            status_time,
            notes: Some(notes),
        }
    }
}

pub struct StatusLogRepository {
    pool: PgPool,
}

impl StatusLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, entry: &NewStatusLog) -> AppResult<EquipmentStatusLog> {
        Self::insert_with(&self.pool, entry).await
    }

    /// Insertar dentro de una transacción existente
    pub async fn insert_with<'e, E: PgExecutor<'e>>(
        executor: E,
        entry: &NewStatusLog,
    ) -> AppResult<EquipmentStatusLog> {
        let log = sqlx::query_as::<_, EquipmentStatusLog>(
            r#"
            INSERT INTO equipment_status_log
                (equipment_id, status, loading_session_id, location, operator_name,
                 fuel_level, engine_hours, status_time, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(entry.equipment_id)
        .bind(&entry.status)
        .bind(entry.loading_session_id)
        .bind(&entry.location)
        .bind(&entry.operator_name)
        .bind(entry.fuel_level)
        .bind(entry.engine_hours)
        .bind(entry.status_time)
        .bind(&entry.notes)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

        Ok(log)
    }

    /// Último log por (status_time, id) - el desempate por id es relevante
    /// cuando dos entradas comparten timestamp
    pub async fn latest_for_equipment(
        &self,
        equipment_id: i64,
    ) -> AppResult<Option<EquipmentStatusLog>> {
        let log = sqlx::query_as::<_, EquipmentStatusLog>(
            r#"
            SELECT * FROM equipment_status_log
            WHERE equipment_id = $1
            ORDER BY status_time DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(log)
    }

    pub async fn list_for_equipment(
        &self,
        equipment_id: i64,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<EquipmentStatusLog>> {
        let logs = sqlx::query_as::<_, EquipmentStatusLog>(
            r#"
            SELECT * FROM equipment_status_log
            WHERE equipment_id = $1
            ORDER BY status_time DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(equipment_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// Últimos logs de toda la flota - para el feed de actividad reciente
    pub async fn recent_across_fleet(&self, limit: i64) -> AppResult<Vec<StatusLogWithEquipment>> {
        let logs = sqlx::query_as::<_, StatusLogWithEquipment>(
            r#"
            SELECT l.equipment_id, e.code AS equipment_code, l.status,
                   l.operator_name, l.notes, l.status_time
            FROM equipment_status_log l
            JOIN equipment e ON e.id = l.equipment_id
            ORDER BY l.status_time DESC, l.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// Equipos cuyo último nivel de combustible reportado está bajo el
    /// umbral - para el resumen del dashboard
    pub async fn count_low_fuel_equipment(&self, threshold: f64) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM (
                SELECT DISTINCT ON (equipment_id) equipment_id, fuel_level
                FROM equipment_status_log
                WHERE fuel_level IS NOT NULL
                ORDER BY equipment_id, status_time DESC, id DESC
            ) latest
            WHERE latest.fuel_level < $1
            "#,
        )
        .bind(rust_decimal::Decimal::from_f64_retain(threshold).unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Nivel de combustible anterior al log dado - para detectar cruces de
    /// umbral en el monitor de condiciones
    pub async fn previous_fuel_level(
        &self,
        equipment_id: i64,
        before_log_id: i64,
    ) -> AppResult<Option<Decimal>> {
        let row: Option<(Option<Decimal>,)> = sqlx::query_as(
            r#"
            SELECT fuel_level FROM equipment_status_log
            WHERE equipment_id = $1 AND id < $2 AND fuel_level IS NOT NULL
            ORDER BY status_time DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(equipment_id)
        .bind(before_log_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(|r| r.0))
    }
}
