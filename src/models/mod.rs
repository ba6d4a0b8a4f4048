//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod breakdown;
pub mod bucket_activity;
pub mod equipment;
pub mod loading_session;
pub mod stacking_area;
pub mod status_log;
pub mod user;
