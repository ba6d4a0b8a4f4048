use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::loading_session_controller::LoadingSessionController;
use crate::dto::common::{ApiResponse, Pagination};
use crate::dto::loading_session_dto::{
    CloseSessionRequest, LoadingSessionResponse, StartSessionRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_loading_session_router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_session))
        .route("/", get(list_sessions))
        .route("/:id", get(get_session))
        .route("/:id/close", put(close_session))
}

async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<ApiResponse<LoadingSessionResponse>>, AppError> {
    let controller = LoadingSessionController::new(state.pool.clone());
    let response = controller.start(request).await?;
    Ok(Json(response))
}

async fn list_sessions(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<LoadingSessionResponse>>, AppError> {
    let controller = LoadingSessionController::new(state.pool.clone());
    let response = controller
        .list(pagination.limit_or(50), pagination.offset_or_zero())
        .await?;
    Ok(Json(response))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LoadingSessionResponse>, AppError> {
    let controller = LoadingSessionController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CloseSessionRequest>,
) -> Result<Json<ApiResponse<LoadingSessionResponse>>, AppError> {
    let controller = LoadingSessionController::new(state.pool.clone());
    let response = controller.close(id, request).await?;
    Ok(Json(response))
}
