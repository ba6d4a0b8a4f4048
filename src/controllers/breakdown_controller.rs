//! Controller de EquipmentBreakdown
//!
//! Orquesta el ciclo de vida de averías: valida, recalcula la duración,
//! escribe la avería y su status log acompañante en una sola transacción
//! y recién después del commit invalida el cache del equipo.

use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::cache::EquipmentCache;
use crate::dto::breakdown_dto::{BreakdownResponse, CreateBreakdownRequest, UpdateBreakdownRequest};
use crate::dto::common::ApiResponse;
use crate::models::breakdown::{BreakdownSeverity, BreakdownStatus, BreakdownType, EquipmentBreakdown};
use crate::repositories::breakdown_repository::{
    BreakdownChanges, BreakdownRepository, NewBreakdown,
};
use crate::repositories::equipment_repository::EquipmentRepository;
use crate::services::breakdown_lifecycle::{self, compute_duration_minutes};
use crate::services::condition_monitor;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use crate::utils::validation::validate_time_order;

pub struct BreakdownController {
    pool: PgPool,
    repository: BreakdownRepository,
    cache: EquipmentCache,
}

impl BreakdownController {
    pub fn new(pool: PgPool, cache: EquipmentCache) -> Self {
        Self {
            repository: BreakdownRepository::new(pool.clone()),
            pool,
            cache,
        }
    }

    pub async fn create(
        &self,
        request: CreateBreakdownRequest,
    ) -> Result<ApiResponse<BreakdownResponse>, AppError> {
        request.validate()?;

        if BreakdownType::parse(&request.breakdown_type).is_none() {
            return Err(validation_error("breakdown_type", "Tipo de avería inválido"));
        }

        let severity = request.severity.unwrap_or_else(|| "medium".to_string());
        if BreakdownSeverity::parse(&severity).is_none() {
            return Err(validation_error(
                "severity",
                "Severidad inválida: usar low, medium, high o critical",
            ));
        }

        let status = request.status.unwrap_or_else(|| "ongoing".to_string());
        match BreakdownStatus::parse(&status) {
            Some(parsed) if parsed.is_active() => {}
            _ => {
                return Err(validation_error(
                    "status",
                    "Estado inicial inválido: usar ongoing o pending_parts",
                ))
            }
        }

        validate_time_order(request.start_time, request.end_time)
            .map_err(|_| validation_error("end_time", "end_time no puede ser anterior a start_time"))?;

        EquipmentRepository::new(self.pool.clone())
            .find_by_id(request.equipment_id)
            .await?
            .ok_or_else(|| not_found_error("Equipment", request.equipment_id))?;

        let new = NewBreakdown {
            equipment_id: request.equipment_id,
            loading_session_id: request.loading_session_id,
            breakdown_type: request.breakdown_type,
            description: request.description,
            start_time: request.start_time,
            end_time: request.end_time,
            duration_minutes: compute_duration_minutes(request.start_time, request.end_time),
            severity,
            repair_cost: request
                .repair_cost
                .and_then(Decimal::from_f64_retain)
                .unwrap_or_default(),
            status,
            reported_by: request.reported_by,
        };

        let mut tx = self.pool.begin().await?;
        let breakdown = BreakdownRepository::insert_with(&mut *tx, &new).await?;
        breakdown_lifecycle::on_reported(&mut tx, &breakdown).await?;
        tx.commit().await?;

        self.cache.invalidate(breakdown.equipment_id).await;
        condition_monitor::report_breakdown_severity(&breakdown);

        Ok(ApiResponse::success_with_message(
            breakdown.into(),
            "Avería reportada exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateBreakdownRequest,
    ) -> Result<ApiResponse<BreakdownResponse>, AppError> {
        request.validate()?;

        let existing = self.find_existing(id).await?;

        let breakdown_type = request
            .breakdown_type
            .unwrap_or_else(|| existing.breakdown_type.clone());
        if BreakdownType::parse(&breakdown_type).is_none() {
            return Err(validation_error("breakdown_type", "Tipo de avería inválido"));
        }

        let severity = request.severity.unwrap_or_else(|| existing.severity.clone());
        if BreakdownSeverity::parse(&severity).is_none() {
            return Err(validation_error(
                "severity",
                "Severidad inválida: usar low, medium, high o critical",
            ));
        }

        let status = request.status.unwrap_or_else(|| existing.status.clone());
        if BreakdownStatus::parse(&status).is_none() {
            return Err(validation_error(
                "status",
                "Estado inválido: usar ongoing, pending_parts o repaired",
            ));
        }

        let start_time = request.start_time.unwrap_or(existing.start_time);
        let end_time = request.end_time.or(existing.end_time);

        validate_time_order(start_time, end_time)
            .map_err(|_| validation_error("end_time", "end_time no puede ser anterior a start_time"))?;

        let changes = BreakdownChanges {
            breakdown_type,
            description: request.description.unwrap_or_else(|| existing.description.clone()),
            start_time,
            end_time,
            // La duración se recalcula siempre antes de persistir
            duration_minutes: compute_duration_minutes(start_time, end_time),
            severity,
            repair_cost: request
                .repair_cost
                .and_then(Decimal::from_f64_retain)
                .unwrap_or(existing.repair_cost),
            repaired_by: request.repaired_by.or_else(|| existing.repaired_by.clone()),
            status,
        };

        let mut tx = self.pool.begin().await?;
        let updated = BreakdownRepository::update_with(&mut *tx, id, &changes).await?;
        breakdown_lifecycle::on_updated(&mut tx, &existing.status, &updated).await?;
        tx.commit().await?;

        self.cache.invalidate(updated.equipment_id).await;
        condition_monitor::report_breakdown_severity(&updated);

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Avería actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let existing = self.find_existing(id).await?;

        let mut tx = self.pool.begin().await?;
        BreakdownRepository::delete_with(&mut *tx, id).await?;
        breakdown_lifecycle::on_removed(&mut tx, &existing).await?;
        tx.commit().await?;

        self.cache.invalidate(existing.equipment_id).await;

        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<BreakdownResponse, AppError> {
        let breakdown = self.find_existing(id).await?;
        Ok(breakdown.into())
    }

    pub async fn list_for_equipment(
        &self,
        equipment_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BreakdownResponse>, AppError> {
        let breakdowns = self
            .repository
            .list_for_equipment(equipment_id, limit, offset)
            .await?;

        Ok(breakdowns.into_iter().map(BreakdownResponse::from).collect())
    }

    async fn find_existing(&self, id: i64) -> Result<EquipmentBreakdown, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Breakdown", id))
    }
}
