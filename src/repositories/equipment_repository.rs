//! Repositorio de Equipment
//!
//! Acceso SQL a la tabla `equipment`. El estado operacional derivado NO
//! vive aquí - lo calcula `services::status_resolver` a partir de los logs
//! y las averías.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::equipment::Equipment;
use crate::utils::errors::AppResult;

/// Filtros para listados de equipos
#[derive(Debug, Default)]
pub struct EquipmentFilters {
    pub equipment_type: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub struct EquipmentRepository {
    pool: PgPool,
}

impl EquipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        code: String,
        equipment_type: String,
        brand: Option<String>,
        model: Option<String>,
        capacity: Option<Decimal>,
        year_manufacture: Option<i32>,
        notes: Option<String>,
    ) -> AppResult<Equipment> {
        let now = Utc::now();

        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (code, equipment_type, brand, model, capacity, year_manufacture, status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'active', $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(equipment_type)
        .bind(brand)
        .bind(model)
        .bind(capacity)
        .bind(year_manufacture)
        .bind(notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(equipment)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Equipment>> {
        let equipment = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(equipment)
    }

    pub async fn code_exists(&self, code: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM equipment WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn list(&self, filters: &EquipmentFilters) -> AppResult<Vec<Equipment>> {
        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT * FROM equipment
            WHERE ($1::text IS NULL OR equipment_type = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY equipment_type, code
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.equipment_type.as_deref())
        .bind(filters.status.as_deref())
        .bind(filters.limit.unwrap_or(100))
        .bind(filters.offset.unwrap_or(0))
        .fetch_all(&self.pool)
        .await?;

        Ok(equipment)
    }

    /// Equipos con estado administrativo `active` - los que pinta el dashboard
    pub async fn list_active(&self) -> AppResult<Vec<Equipment>> {
        let equipment = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment WHERE status = 'active' ORDER BY equipment_type, code",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(equipment)
    }

    pub async fn update(
        &self,
        id: i64,
        code: String,
        brand: Option<String>,
        model: Option<String>,
        capacity: Option<Decimal>,
        year_manufacture: Option<i32>,
        status: String,
        notes: Option<String>,
    ) -> AppResult<Equipment> {
        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET code = $2, brand = $3, model = $4, capacity = $5,
                year_manufacture = $6, status = $7, notes = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(code)
        .bind(brand)
        .bind(model)
        .bind(capacity)
        .bind(year_manufacture)
        .bind(status)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(equipment)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
