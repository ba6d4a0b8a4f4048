use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{
    EquipmentBoardEntry, EquipmentSummary, ProductionMetrics, RecentActivityEntry,
};
use crate::middleware::auth::{auth_middleware, require_dashboard_access};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router del dashboard: autenticación JWT y rol manager/superadmin.
/// Los layers corren de abajo hacia arriba, el auth va último.
pub fn create_dashboard_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/equipment-status", get(equipment_board))
        .route("/equipment-summary", get(equipment_summary))
        .route("/production-metrics/:range", get(production_metrics))
        .route("/recent-activities", get(recent_activities))
        .route_layer(middleware::from_fn(require_dashboard_access))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn equipment_board(
    State(state): State<AppState>,
) -> Result<Json<Vec<EquipmentBoardEntry>>, AppError> {
    let controller = DashboardController::new(&state);
    let response = controller.equipment_board().await?;
    Ok(Json(response))
}

async fn equipment_summary(
    State(state): State<AppState>,
) -> Result<Json<EquipmentSummary>, AppError> {
    let controller = DashboardController::new(&state);
    let response = controller.equipment_summary().await?;
    Ok(Json(response))
}

async fn production_metrics(
    State(state): State<AppState>,
    Path(range): Path<String>,
) -> Result<Json<ProductionMetrics>, AppError> {
    let controller = DashboardController::new(&state);
    let response = controller.production_metrics(&range).await?;
    Ok(Json(response))
}

async fn recent_activities(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecentActivityEntry>>, AppError> {
    let controller = DashboardController::new(&state);
    let response = controller.recent_activities().await?;
    Ok(Json(response))
}
