pub mod auth_controller;
pub mod breakdown_controller;
pub mod bucket_activity_controller;
pub mod dashboard_controller;
pub mod equipment_controller;
pub mod loading_session_controller;
pub mod stacking_area_controller;
pub mod status_log_controller;
