pub mod auth_dto;
pub mod breakdown_dto;
pub mod bucket_activity_dto;
pub mod common;
pub mod dashboard_dto;
pub mod equipment_dto;
pub mod loading_session_dto;
pub mod stacking_area_dto;
pub mod status_log_dto;
