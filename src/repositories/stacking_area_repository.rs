//! Repositorio de StackingArea

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::stacking_area::StackingArea;
use crate::utils::errors::AppResult;

pub struct StackingAreaRepository {
    pool: PgPool,
}

impl StackingAreaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        location: Option<String>,
        capacity: Option<Decimal>,
        notes: Option<String>,
    ) -> AppResult<StackingArea> {
        let now = Utc::now();

        let area = sqlx::query_as::<_, StackingArea>(
            r#"
            INSERT INTO stacking_areas (name, location, capacity, current_stock, status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, 0, 'active', $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(location)
        .bind(capacity)
        .bind(notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(area)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<StackingArea>> {
        let area = sqlx::query_as::<_, StackingArea>("SELECT * FROM stacking_areas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(area)
    }

    pub async fn name_exists(&self, name: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM stacking_areas WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn list(&self) -> AppResult<Vec<StackingArea>> {
        let areas = sqlx::query_as::<_, StackingArea>("SELECT * FROM stacking_areas ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(areas)
    }

    pub async fn update(
        &self,
        id: i64,
        name: String,
        location: Option<String>,
        capacity: Option<Decimal>,
        current_stock: Option<Decimal>,
        status: String,
        notes: Option<String>,
    ) -> AppResult<StackingArea> {
        let area = sqlx::query_as::<_, StackingArea>(
            r#"
            UPDATE stacking_areas
            SET name = $2, location = $3, capacity = $4, current_stock = $5,
                status = $6, notes = $7, updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(location)
        .bind(capacity)
        .bind(current_stock)
        .bind(status)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(area)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM stacking_areas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
