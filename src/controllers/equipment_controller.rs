//! Controller de Equipment
//!
//! CRUD del catálogo de equipos más el endpoint de estado operacional
//! derivado, que delega en el status resolver.

use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::cache::EquipmentCache;
use crate::dto::common::ApiResponse;
use crate::dto::equipment_dto::{
    ActiveBreakdownInfo, CreateEquipmentRequest, EquipmentFiltersQuery, EquipmentResponse,
    EquipmentStatusResponse, UpdateEquipmentRequest,
};
use crate::models::equipment::{Equipment, EquipmentStatus, EquipmentType};
use crate::repositories::equipment_repository::{EquipmentFilters, EquipmentRepository};
use crate::services::status_resolver::StatusResolver;
use crate::utils::errors::{conflict_error, not_found_error, validation_error, AppError};
use crate::utils::validation::validate_equipment_code;

pub struct EquipmentController {
    pool: PgPool,
    repository: EquipmentRepository,
    cache: EquipmentCache,
    status_ttl: u64,
}

impl EquipmentController {
    pub fn new(pool: PgPool, cache: EquipmentCache, status_ttl: u64) -> Self {
        Self {
            repository: EquipmentRepository::new(pool.clone()),
            pool,
            cache,
            status_ttl,
        }
    }

    pub async fn create(
        &self,
        request: CreateEquipmentRequest,
    ) -> Result<ApiResponse<EquipmentResponse>, AppError> {
        request.validate()?;

        validate_equipment_code(&request.code)
            .map_err(|_| validation_error("code", "Formato de código inválido, usar XX-000"))?;

        if EquipmentType::parse(&request.equipment_type).is_none() {
            return Err(validation_error(
                "equipment_type",
                "Tipo de equipo inválido: usar dumptruck o excavator",
            ));
        }

        if self.repository.code_exists(&request.code).await? {
            return Err(conflict_error("Equipment", "code", &request.code));
        }

        let equipment = self
            .repository
            .create(
                request.code,
                request.equipment_type,
                request.brand,
                request.model,
                request.capacity.and_then(Decimal::from_f64_retain),
                request.year_manufacture,
                request.notes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            equipment.into(),
            "Equipo registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<EquipmentResponse, AppError> {
        let equipment = self.find_existing(id).await?;
        Ok(equipment.into())
    }

    pub async fn list(
        &self,
        filters: EquipmentFiltersQuery,
    ) -> Result<Vec<EquipmentResponse>, AppError> {
        let equipment = self
            .repository
            .list(&EquipmentFilters {
                equipment_type: filters.equipment_type,
                status: filters.status,
                limit: filters.limit,
                offset: filters.offset,
            })
            .await?;

        Ok(equipment.into_iter().map(EquipmentResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateEquipmentRequest,
    ) -> Result<ApiResponse<EquipmentResponse>, AppError> {
        request.validate()?;

        let existing = self.find_existing(id).await?;

        let code = match request.code {
            Some(code) if code != existing.code => {
                validate_equipment_code(&code).map_err(|_| {
                    validation_error("code", "Formato de código inválido, usar XX-000")
                })?;
                if self.repository.code_exists(&code).await? {
                    return Err(conflict_error("Equipment", "code", &code));
                }
                code
            }
            Some(code) => code,
            None => existing.code.clone(),
        };

        let status = match request.status {
            Some(status) => {
                if EquipmentStatus::parse(&status).is_none() {
                    return Err(validation_error(
                        "status",
                        "Estado inválido: usar active, inactive o maintenance",
                    ));
                }
                status
            }
            None => existing.status.clone(),
        };

        let updated = self
            .repository
            .update(
                id,
                code,
                request.brand.or(existing.brand),
                request.model.or(existing.model),
                request
                    .capacity
                    .and_then(Decimal::from_f64_retain)
                    .or(existing.capacity),
                request.year_manufacture.or(existing.year_manufacture),
                status,
                request.notes.or(existing.notes),
            )
            .await?;

        // El estado administrativo alimenta los agregados del dashboard
        self.cache.invalidate(id).await;

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Equipo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.find_existing(id).await?;
        self.repository.delete(id).await?;
        self.cache.invalidate(id).await;
        Ok(())
    }

    /// Estado operacional derivado: las cuatro salidas del resolver
    pub async fn status(&self, id: i64) -> Result<EquipmentStatusResponse, AppError> {
        let equipment = self.find_existing(id).await?;

        let resolver =
            StatusResolver::new(self.pool.clone(), self.cache.clone(), self.status_ttl);

        let status = resolver.current_status(id).await?;
        let can_work = resolver.can_work(id).await?;
        let breakdown_reason = resolver.breakdown_reason(id).await?;
        let active_breakdown = resolver.active_breakdown(id).await?;

        Ok(EquipmentStatusResponse {
            equipment_id: equipment.id,
            code: equipment.code,
            current_status: status.as_str().to_string(),
            status_color: status.color().to_string(),
            can_work,
            breakdown_reason,
            active_breakdown: active_breakdown.map(ActiveBreakdownInfo::from),
        })
    }

    async fn find_existing(&self, id: i64) -> Result<Equipment, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Equipment", id))
    }
}
