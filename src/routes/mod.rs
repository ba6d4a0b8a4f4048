pub mod auth_routes;
pub mod breakdown_routes;
pub mod bucket_activity_routes;
pub mod dashboard_routes;
pub mod equipment_routes;
pub mod loading_session_routes;
pub mod stacking_area_routes;
pub mod status_log_routes;
