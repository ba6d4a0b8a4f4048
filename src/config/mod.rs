//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de variables de entorno
//! y los parámetros operacionales (TTLs, umbrales de combustible).

pub mod environment;
pub mod operations;

pub use environment::EnvironmentConfig;
pub use operations::OperationsConfig;
