use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::breakdown_controller::BreakdownController;
use crate::dto::breakdown_dto::{BreakdownResponse, CreateBreakdownRequest, UpdateBreakdownRequest};
use crate::dto::common::{ApiResponse, Pagination};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_breakdown_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_breakdown))
        .route("/:id", get(get_breakdown))
        .route("/:id", put(update_breakdown))
        .route("/:id", delete(delete_breakdown))
        .route("/equipment/:equipment_id", get(list_for_equipment))
}

fn controller(state: &AppState) -> BreakdownController {
    BreakdownController::new(state.pool.clone(), state.equipment_cache.clone())
}

async fn create_breakdown(
    State(state): State<AppState>,
    Json(request): Json<CreateBreakdownRequest>,
) -> Result<Json<ApiResponse<BreakdownResponse>>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn get_breakdown(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BreakdownResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_breakdown(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBreakdownRequest>,
) -> Result<Json<ApiResponse<BreakdownResponse>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_breakdown(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Avería eliminada exitosamente"
    })))
}

async fn list_for_equipment(
    State(state): State<AppState>,
    Path(equipment_id): Path<i64>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<BreakdownResponse>>, AppError> {
    let response = controller(&state)
        .list_for_equipment(
            equipment_id,
            pagination.limit_or(50),
            pagination.offset_or_zero(),
        )
        .await?;
    Ok(Json(response))
}
