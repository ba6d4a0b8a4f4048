//! Controller de BucketActivity
//!
//! Registro de baldadas dentro de una sesión activa. La escritura y el
//! recálculo de totales de la sesión van en la misma transacción. Un
//! equipo con avería activa no puede asignarse a trabajar.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::bucket_activity_dto::{BucketActivityResponse, CreateBucketActivityRequest};
use crate::dto::common::ApiResponse;
use crate::models::equipment::EquipmentType;
use crate::repositories::breakdown_repository::BreakdownRepository;
use crate::repositories::bucket_activity_repository::BucketActivityRepository;
use crate::repositories::equipment_repository::EquipmentRepository;
use crate::repositories::loading_session_repository::LoadingSessionRepository;
use crate::utils::errors::{bad_request_error, not_found_error, validation_error, AppError};

pub struct BucketActivityController {
    pool: PgPool,
    repository: BucketActivityRepository,
}

impl BucketActivityController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BucketActivityRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        request: CreateBucketActivityRequest,
    ) -> Result<ApiResponse<BucketActivityResponse>, AppError> {
        request.validate()?;

        let session = LoadingSessionRepository::new(self.pool.clone())
            .find_by_id(request.loading_session_id)
            .await?
            .ok_or_else(|| not_found_error("LoadingSession", request.loading_session_id))?;

        if session.status != "active" {
            return Err(bad_request_error(
                "No se pueden registrar baldadas en una sesión cerrada",
            ));
        }

        self.check_equipment(request.excavator_id, EquipmentType::Excavator)
            .await?;
        self.check_equipment(request.dumptruck_id, EquipmentType::Dumptruck)
            .await?;

        let estimated_tonnage = Decimal::from_f64_retain(request.estimated_tonnage)
            .ok_or_else(|| validation_error("estimated_tonnage", "Tonelaje inválido"))?;

        let mut tx = self.pool.begin().await?;
        let activity = BucketActivityRepository::insert_with(
            &mut *tx,
            request.loading_session_id,
            request.excavator_id,
            request.dumptruck_id,
            request.bucket_count,
            estimated_tonnage,
            request.activity_time.unwrap_or_else(Utc::now),
            request.notes,
        )
        .await?;
        LoadingSessionRepository::recompute_totals_with(&mut *tx, request.loading_session_id)
            .await?;
        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            activity.into(),
            "Actividad de baldadas registrada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let activity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("BucketActivity", id))?;

        let mut tx = self.pool.begin().await?;
        BucketActivityRepository::delete_with(&mut *tx, id).await?;
        LoadingSessionRepository::recompute_totals_with(&mut *tx, activity.loading_session_id)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    pub async fn list_by_session(
        &self,
        session_id: i64,
    ) -> Result<Vec<BucketActivityResponse>, AppError> {
        let activities = self.repository.list_by_session(session_id).await?;
        Ok(activities.into_iter().map(BucketActivityResponse::from).collect())
    }

    /// El equipo debe existir, ser del tipo esperado y poder trabajar
    /// (sin averías activas)
    async fn check_equipment(
        &self,
        equipment_id: i64,
        expected: EquipmentType,
    ) -> Result<(), AppError> {
        let equipment = EquipmentRepository::new(self.pool.clone())
            .find_by_id(equipment_id)
            .await?
            .ok_or_else(|| not_found_error("Equipment", equipment_id))?;

        if equipment.equipment_type != expected.as_str() {
            return Err(bad_request_error(&format!(
                "El equipo {} no es un {}",
                equipment.code,
                expected.as_str()
            )));
        }

        let has_active = BreakdownRepository::new(self.pool.clone())
            .has_active_for_equipment(equipment_id)
            .await?;
        if has_active {
            return Err(bad_request_error(&format!(
                "El equipo {} tiene una avería activa y no puede trabajar",
                equipment.code
            )));
        }

        Ok(())
    }
}
