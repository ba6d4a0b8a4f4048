use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::status_log_controller::StatusLogController;
use crate::dto::common::{ApiResponse, Pagination};
use crate::dto::status_log_dto::{BulkStatusLogRequest, CreateStatusLogRequest, StatusLogResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_status_log_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_status_log))
        .route("/bulk", post(create_status_logs_bulk))
        .route("/equipment/:equipment_id", get(list_for_equipment))
}

fn controller(state: &AppState) -> StatusLogController {
    StatusLogController::new(
        state.pool.clone(),
        state.equipment_cache.clone(),
        state.operations.clone(),
    )
}

async fn create_status_log(
    State(state): State<AppState>,
    Json(request): Json<CreateStatusLogRequest>,
) -> Result<Json<ApiResponse<StatusLogResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn create_status_logs_bulk(
    State(state): State<AppState>,
    Json(request): Json<BulkStatusLogRequest>,
) -> Result<Json<ApiResponse<Vec<StatusLogResponse>>>, AppError> {
    let response = controller(&state).create_bulk(request).await?;
    Ok(Json(response))
}

async fn list_for_equipment(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<StatusLogResponse>>, AppError> {
    let response = controller(&state)
        .list_for_equipment(
            equipment_id,
            pagination.limit_or(50),
            pagination.offset_or_zero(),
        )
        .await?;
    Ok(Json(response))
}
