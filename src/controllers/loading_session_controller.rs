//! Controller de LoadingSession
//!
//! Apertura y cierre de sesiones de carga. El código de sesión lo genera
//! el repositorio a partir de la secuencia del día.

use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::loading_session_dto::{
    CloseSessionRequest, LoadingSessionResponse, StartSessionRequest,
};
use crate::models::loading_session::{LoadingSession, SessionStatus};
use crate::repositories::loading_session_repository::LoadingSessionRepository;
use crate::repositories::stacking_area_repository::StackingAreaRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{bad_request_error, not_found_error, validation_error, AppError};

const VALID_SHIFTS: [&str; 3] = ["A", "B", "C"];

pub struct LoadingSessionController {
    pool: PgPool,
    repository: LoadingSessionRepository,
}

impl LoadingSessionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LoadingSessionRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn start(
        &self,
        request: StartSessionRequest,
    ) -> Result<ApiResponse<LoadingSessionResponse>, AppError> {
        request.validate()?;

        if !VALID_SHIFTS.contains(&request.shift.as_str()) {
            return Err(validation_error("shift", "Turno inválido: usar A, B o C"));
        }

        StackingAreaRepository::new(self.pool.clone())
            .find_by_id(request.stacking_area_id)
            .await?
            .ok_or_else(|| not_found_error("StackingArea", request.stacking_area_id))?;

        UserRepository::new(self.pool.clone())
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| not_found_error("User", request.user_id))?;

        let session = self
            .repository
            .create(
                request.stacking_area_id,
                request.user_id,
                request.shift,
                request.start_time.unwrap_or_else(Utc::now),
                request.notes,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            session.into(),
            "Sesión de carga iniciada exitosamente".to_string(),
        ))
    }

    pub async fn close(
        &self,
        id: i64,
        request: CloseSessionRequest,
    ) -> Result<ApiResponse<LoadingSessionResponse>, AppError> {
        request.validate()?;

        let existing = self.find_existing(id).await?;
        if existing.status != "active" {
            return Err(bad_request_error("La sesión ya está cerrada"));
        }

        let status = request.status.unwrap_or_else(|| "completed".to_string());
        match SessionStatus::parse(&status) {
            Some(SessionStatus::Completed) | Some(SessionStatus::Cancelled) => {}
            _ => {
                return Err(validation_error(
                    "status",
                    "Estado de cierre inválido: usar completed o cancelled",
                ))
            }
        }

        let end_time = request.end_time.unwrap_or_else(Utc::now);
        if end_time < existing.start_time {
            return Err(validation_error(
                "end_time",
                "end_time no puede ser anterior a start_time",
            ));
        }

        let session = self
            .repository
            .close(id, status, end_time, request.notes)
            .await?;

        Ok(ApiResponse::success_with_message(
            session.into(),
            "Sesión de carga cerrada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<LoadingSessionResponse, AppError> {
        let session = self.find_existing(id).await?;
        Ok(session.into())
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<LoadingSessionResponse>, AppError> {
        let sessions = self.repository.list(limit, offset).await?;
        Ok(sessions.into_iter().map(LoadingSessionResponse::from).collect())
    }

    async fn find_existing(&self, id: i64) -> Result<LoadingSession, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("LoadingSession", id))
    }
}
