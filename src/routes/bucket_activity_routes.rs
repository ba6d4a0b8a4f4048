use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};

use crate::controllers::bucket_activity_controller::BucketActivityController;
use crate::dto::bucket_activity_dto::{BucketActivityResponse, CreateBucketActivityRequest};
use crate::dto::common::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_bucket_activity_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_activity))
        .route("/:id", delete(delete_activity))
        .route("/session/:session_id", get(list_by_session))
}

async fn create_activity(
    State(state): State<AppState>,
    Json(request): Json<CreateBucketActivityRequest>,
) -> Result<Json<ApiResponse<BucketActivityResponse>>, AppError> {
    let controller = BucketActivityController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = BucketActivityController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Actividad eliminada exitosamente"
    })))
}

async fn list_by_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> Result<Json<Vec<BucketActivityResponse>>, AppError> {
    let controller = BucketActivityController::new(state.pool.clone());
    let response = controller.list_by_session(session_id).await?;
    Ok(Json(response))
}
