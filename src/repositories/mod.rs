//! Repositorios
//!
//! Acceso a datos con SQL explícito (sqlx). Las variantes `*_with` de los
//! métodos aceptan un executor para participar en transacciones.

pub mod breakdown_repository;
pub mod bucket_activity_repository;
pub mod equipment_repository;
pub mod loading_session_repository;
pub mod stacking_area_repository;
pub mod status_log_repository;
pub mod user_repository;
