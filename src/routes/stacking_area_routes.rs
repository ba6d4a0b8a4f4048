use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::stacking_area_controller::StackingAreaController;
use crate::dto::common::ApiResponse;
use crate::dto::stacking_area_dto::{
    CreateStackingAreaRequest, StackingAreaResponse, UpdateStackingAreaRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_stacking_area_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_area))
        .route("/", get(list_areas))
        .route("/:id", get(get_area))
        .route("/:id", put(update_area))
        .route("/:id", delete(delete_area))
}

async fn create_area(
    State(state): State<AppState>,
    Json(request): Json<CreateStackingAreaRequest>,
) -> Result<Json<ApiResponse<StackingAreaResponse>>, AppError> {
    let controller = StackingAreaController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_areas(
    State(state): State<AppState>,
) -> Result<Json<Vec<StackingAreaResponse>>, AppError> {
    let controller = StackingAreaController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_area(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StackingAreaResponse>, AppError> {
    let controller = StackingAreaController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_area(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStackingAreaRequest>,
) -> Result<Json<ApiResponse<StackingAreaResponse>>, AppError> {
    let controller = StackingAreaController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_area(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = StackingAreaController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Área de acopio eliminada exitosamente"
    })))
}
