mod cache;
mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use cache::redis_client::RedisClient;
use cache::CacheConfig;
use config::{EnvironmentConfig, OperationsConfig};
use database::DatabaseConnection;
use middleware::cors::cors_middleware_from_env;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("⛏️ Mining Operations - Backend de operaciones de mina");
    info!("====================================================");

    let config = EnvironmentConfig::default();
    let operations = OperationsConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Inicializar Redis y cache
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

    let redis_config = CacheConfig {
        redis_url,
        default_ttl: operations.cache_ttl_equipment_status,
        max_connections: 10,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    let app_state = AppState::new(pool, config.clone(), operations, redis_client);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest(
            "/api/equipment",
            routes::equipment_routes::create_equipment_router(),
        )
        .nest(
            "/api/breakdown",
            routes::breakdown_routes::create_breakdown_router(),
        )
        .nest(
            "/api/status-log",
            routes::status_log_routes::create_status_log_router(),
        )
        .nest(
            "/api/stacking-area",
            routes::stacking_area_routes::create_stacking_area_router(),
        )
        .nest(
            "/api/loading-session",
            routes::loading_session_routes::create_loading_session_router(),
        )
        .nest(
            "/api/bucket-activity",
            routes::bucket_activity_routes::create_bucket_activity_router(),
        )
        .nest(
            "/api/dashboard",
            routes::dashboard_routes::create_dashboard_router(app_state.clone()),
        )
        .layer(cors_middleware_from_env())
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/login - Login de usuario");
    info!("🚜 Endpoints - Equipment:");
    info!("   POST /api/equipment - Registrar equipo");
    info!("   GET  /api/equipment - Listar equipos");
    info!("   GET  /api/equipment/:id - Obtener equipo");
    info!("   GET  /api/equipment/:id/status - Estado operacional derivado");
    info!("   PUT  /api/equipment/:id - Actualizar equipo");
    info!("   DELETE /api/equipment/:id - Eliminar equipo");
    info!("🔧 Endpoints - Breakdown:");
    info!("   POST /api/breakdown - Reportar avería");
    info!("   GET  /api/breakdown/:id - Obtener avería");
    info!("   PUT  /api/breakdown/:id - Actualizar avería (reparar/reabrir)");
    info!("   DELETE /api/breakdown/:id - Eliminar avería");
    info!("   GET  /api/breakdown/equipment/:id - Averías de un equipo");
    info!("📋 Endpoints - Status Log:");
    info!("   POST /api/status-log - Registrar status log");
    info!("   POST /api/status-log/bulk - Actualización masiva de fin de turno");
    info!("   GET  /api/status-log/equipment/:id - Historial de un equipo");
    info!("🏗️ Endpoints - Stacking Area:");
    info!("   POST /api/stacking-area - Registrar área de acopio");
    info!("   GET  /api/stacking-area - Listar áreas");
    info!("⚒️ Endpoints - Loading Session:");
    info!("   POST /api/loading-session - Iniciar sesión de carga");
    info!("   PUT  /api/loading-session/:id/close - Cerrar sesión");
    info!("🪣 Endpoints - Bucket Activity:");
    info!("   POST /api/bucket-activity - Registrar baldadas");
    info!("📊 Endpoints - Dashboard (manager/superadmin):");
    info!("   GET  /api/dashboard/equipment-status - Tablero por equipo");
    info!("   GET  /api/dashboard/equipment-summary - Resumen de flota");
    info!("   GET  /api/dashboard/production-metrics/:range - Métricas (today/week/month)");
    info!("   GET  /api/dashboard/recent-activities - Actividad reciente de la flota");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "mining-operations",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
