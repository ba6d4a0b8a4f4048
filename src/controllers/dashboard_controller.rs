//! Controller del dashboard
//!
//! Construye el servicio de agregados a partir del estado compartido; el
//! control de acceso por rol lo hace el middleware antes de llegar acá.

use crate::dto::dashboard_dto::{
    EquipmentBoardEntry, EquipmentSummary, ProductionMetrics, RecentActivityEntry,
};
use crate::services::dashboard_service::DashboardService;
use crate::services::status_resolver::StatusResolver;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct DashboardController {
    service: DashboardService,
}

impl DashboardController {
    pub fn new(state: &AppState) -> Self {
        let resolver = StatusResolver::new(
            state.pool.clone(),
            state.equipment_cache.clone(),
            state.operations.cache_ttl_equipment_status,
        );

        Self {
            service: DashboardService::new(
                state.pool.clone(),
                state.equipment_cache.clone(),
                resolver,
                state.operations.fuel_warning_level,
                state.operations.cache_ttl_dashboard,
            ),
        }
    }

    pub async fn equipment_board(&self) -> Result<Vec<EquipmentBoardEntry>, AppError> {
        self.service.equipment_board().await
    }

    pub async fn equipment_summary(&self) -> Result<EquipmentSummary, AppError> {
        self.service.equipment_summary().await
    }

    pub async fn production_metrics(&self, range: &str) -> Result<ProductionMetrics, AppError> {
        self.service.production_metrics(range).await
    }

    pub async fn recent_activities(&self) -> Result<Vec<RecentActivityEntry>, AppError> {
        self.service.recent_activities().await
    }
}
