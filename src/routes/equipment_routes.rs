use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::equipment_controller::EquipmentController;
use crate::dto::common::ApiResponse;
use crate::dto::equipment_dto::{
    CreateEquipmentRequest, EquipmentFiltersQuery, EquipmentResponse, EquipmentStatusResponse,
    UpdateEquipmentRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_equipment_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_equipment))
        .route("/", get(list_equipment))
        .route("/:id", get(get_equipment))
        .route("/:id", put(update_equipment))
        .route("/:id", delete(delete_equipment))
        .route("/:id/status", get(equipment_status))
}

fn controller(state: &AppState) -> EquipmentController {
    EquipmentController::new(
        state.pool.clone(),
        state.equipment_cache.clone(),
        state.operations.cache_ttl_equipment_status,
    )
}

async fn create_equipment(
    State(state): State<AppState>,
    Json(request): Json<CreateEquipmentRequest>,
) -> Result<Json<ApiResponse<EquipmentResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn list_equipment(
    State(state): State<AppState>,
    Query(filters): Query<EquipmentFiltersQuery>,
) -> Result<Json<Vec<EquipmentResponse>>, AppError> {
    let response = controller(&state).list(filters).await?;
    Ok(Json(response))
}

async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EquipmentResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEquipmentRequest>,
) -> Result<Json<ApiResponse<EquipmentResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Equipo eliminado exitosamente"
    })))
}

async fn equipment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EquipmentStatusResponse>, AppError> {
    let response = controller(&state).status(id).await?;
    Ok(Json(response))
}
