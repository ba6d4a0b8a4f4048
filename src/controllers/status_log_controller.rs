//! Controller de EquipmentStatusLog
//!
//! Inserciones append-only del historial de estados. Cada escritura
//! invalida el cache del equipo y pasa por el monitor de condiciones
//! (combustible bajo umbral, caída a breakdown). El bulk de fin de turno
//! escribe todas las entradas en una sola transacción.

use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::cache::EquipmentCache;
use crate::config::OperationsConfig;
use crate::dto::common::ApiResponse;
use crate::dto::status_log_dto::{
    BulkStatusLogRequest, CreateStatusLogRequest, StatusLogResponse,
};
use crate::models::status_log::OperationalStatus;
use crate::repositories::equipment_repository::EquipmentRepository;
use crate::repositories::status_log_repository::{NewStatusLog, StatusLogRepository};
use crate::services::condition_monitor;
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct StatusLogController {
    pool: PgPool,
    repository: StatusLogRepository,
    cache: EquipmentCache,
    operations: OperationsConfig,
}

impl StatusLogController {
    pub fn new(pool: PgPool, cache: EquipmentCache, operations: OperationsConfig) -> Self {
        Self {
            repository: StatusLogRepository::new(pool.clone()),
            pool,
            cache,
            operations,
        }
    }

    pub async fn create(
        &self,
        request: CreateStatusLogRequest,
    ) -> Result<ApiResponse<StatusLogResponse>, AppError> {
        let entry = self.validate_entry(request).await?;

        let log = self.repository.insert(&entry).await?;

        self.cache.invalidate(log.equipment_id).await;
        self.monitor(&log).await?;

        Ok(ApiResponse::success_with_message(
            log.into(),
            "Status log registrado exitosamente".to_string(),
        ))
    }

    /// Actualización masiva de fin de turno: todas las entradas en una
    /// transacción, invalidación en lote después del commit
    pub async fn create_bulk(
        &self,
        request: BulkStatusLogRequest,
    ) -> Result<ApiResponse<Vec<StatusLogResponse>>, AppError> {
        request.validate()?;

        let mut entries = Vec::with_capacity(request.entries.len());
        for item in request.entries {
            entries.push(self.validate_entry(item).await?);
        }

        let mut tx = self.pool.begin().await?;
        let mut logs = Vec::with_capacity(entries.len());
        for entry in &entries {
            logs.push(StatusLogRepository::insert_with(&mut *tx, entry).await?);
        }
        tx.commit().await?;

        let equipment_ids: Vec<i64> = logs.iter().map(|log| log.equipment_id).collect();
        self.cache.invalidate_many(&equipment_ids).await;

        for log in &logs {
            self.monitor(log).await?;
        }

        let total = logs.len();
        Ok(ApiResponse::success_with_message(
            logs.into_iter().map(StatusLogResponse::from).collect(),
            format!("{} status logs registrados exitosamente", total),
        ))
    }

    pub async fn list_for_equipment(
        &self,
        equipment_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StatusLogResponse>, AppError> {
        let logs = self
            .repository
            .list_for_equipment(equipment_id, limit, offset)
            .await?;

        Ok(logs.into_iter().map(StatusLogResponse::from).collect())
    }

    async fn validate_entry(
        &self,
        request: CreateStatusLogRequest,
    ) -> Result<NewStatusLog, AppError> {
        request.validate()?;

        if OperationalStatus::parse(&request.status).is_none() {
            return Err(validation_error(
                "status",
                "Estado inválido: usar idle, working, breakdown o maintenance",
            ));
        }

        EquipmentRepository::new(self.pool.clone())
            .find_by_id(request.equipment_id)
            .await?
            .ok_or_else(|| not_found_error("Equipment", request.equipment_id))?;

        Ok(NewStatusLog {
            equipment_id: request.equipment_id,
            status: request.status,
            loading_session_id: request.loading_session_id,
            location: request.location,
            operator_name: request.operator_name,
            fuel_level: request.fuel_level.and_then(Decimal::from_f64_retain),
            engine_hours: request.engine_hours.and_then(Decimal::from_f64_retain),
            status_time: request.status_time.unwrap_or_else(chrono::Utc::now),
            notes: request.notes,
        })
    }

    /// Detección-only: nunca falla el request por una condición de alerta
    async fn monitor(&self, log: &crate::models::status_log::EquipmentStatusLog) -> Result<(), AppError> {
        let previous_fuel = self
            .repository
            .previous_fuel_level(log.equipment_id, log.id)
            .await?;

        let conditions = condition_monitor::evaluate_status_log(log, previous_fuel, &self.operations);
        condition_monitor::report_conditions(log, &conditions);

        Ok(())
    }
}
