pub mod breakdown_lifecycle;
pub mod condition_monitor;
pub mod dashboard_service;
pub mod status_resolver;
