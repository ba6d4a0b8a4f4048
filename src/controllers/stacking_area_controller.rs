//! Controller de StackingArea

use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::stacking_area_dto::{
    CreateStackingAreaRequest, StackingAreaResponse, UpdateStackingAreaRequest,
};
use crate::models::stacking_area::{StackingArea, StackingAreaStatus};
use crate::repositories::stacking_area_repository::StackingAreaRepository;
use crate::utils::errors::{conflict_error, not_found_error, validation_error, AppError};

pub struct StackingAreaController {
    repository: StackingAreaRepository,
}

impl StackingAreaController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: StackingAreaRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateStackingAreaRequest,
    ) -> Result<ApiResponse<StackingAreaResponse>, AppError> {
        request.validate()?;

        if self.repository.name_exists(&request.name).await? {
            return Err(conflict_error("StackingArea", "name", &request.name));
        }

        let area = self
            .repository
            .create(
                request.name,
                request.location,
                request.capacity.and_then(Decimal::from_f64_retain),
                request.notes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            area.into(),
            "Área de acopio registrada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<StackingAreaResponse, AppError> {
        let area = self.find_existing(id).await?;
        Ok(area.into())
    }

    pub async fn list(&self) -> Result<Vec<StackingAreaResponse>, AppError> {
        let areas = self.repository.list().await?;
        Ok(areas.into_iter().map(StackingAreaResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateStackingAreaRequest,
    ) -> Result<ApiResponse<StackingAreaResponse>, AppError> {
        request.validate()?;

        let existing = self.find_existing(id).await?;

        let name = match request.name {
            Some(name) if name != existing.name => {
                if self.repository.name_exists(&name).await? {
                    return Err(conflict_error("StackingArea", "name", &name));
                }
                name
            }
            Some(name) => name,
            None => existing.name.clone(),
        };

        let status = match request.status {
            Some(status) => {
                if StackingAreaStatus::parse(&status).is_none() {
                    return Err(validation_error(
                        "status",
                        "Estado inválido: usar active, inactive o full",
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
                name,
                request.location.or(existing.location),
                request
                    .capacity
                    .and_then(Decimal::from_f64_retain)
                    .or(existing.capacity),
                existing.current_stock,
                status,
                request.notes.or(existing.notes),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Área de acopio actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.find_existing(id).await?;
        self.repository.delete(id).await?;
        Ok(())
    }

    async fn find_existing(&self, id: i64) -> Result<StackingArea, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("StackingArea", id))
    }
}
