use anyhow::Result;
use axum::{middleware, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use rental_marketplace::cache::{redis_client::RedisClient, CacheConfig};
use rental_marketplace::config::environment::EnvironmentConfig;
use rental_marketplace::database::DatabaseConnection;
use rental_marketplace::middleware::auth::{auth_middleware, require_admin};
use rental_marketplace::middleware::cors::cors_layer;
use rental_marketplace::routes;
use rental_marketplace::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🛵 Rental Marketplace - API");
    info!("===========================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Inicializar Redis (almacenamiento de códigos OTP)
    let redis_url = std::env::var("REDIS_URL")
        .unwrap_or_else(|_| "redis://localhost:6379".to_string());

    let redis_config = CacheConfig {
        redis_url,
        default_ttl: config.otp_ttl_seconds,
        max_connections: 10,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    let app_state = AppState::new(pool, config.clone(), redis_client);

    // Rutas públicas
    let public_routes = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/store", routes::store_routes::create_store_router())
        .nest("/api/search", routes::search_routes::create_search_router());

    // Rutas que requieren sesión
    let user_routes = Router::new()
        .nest("/api/auth", routes::auth_routes::create_profile_router())
        .nest("/api/order", routes::order_routes::create_order_router())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Rutas que además requieren rol admin
    let admin_routes = Router::new()
        .nest("/api/store", routes::store_routes::create_store_admin_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/admin/order", routes::order_routes::create_order_admin_router())
        .nest("/api/admin/user", routes::user_routes::create_user_admin_router())
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let app = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints públicos:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/otp/request - Solicitar código OTP");
    info!("   POST /api/auth/otp/verify - Verificar OTP y obtener token");
    info!("   GET  /api/store - Listar tiendas");
    info!("   GET  /api/store/nearby - Tiendas cercanas");
    info!("   GET  /api/search/vehicles - Buscar vehículos disponibles");
    info!("👤 Endpoints de cliente:");
    info!("   GET  /api/auth/me - Perfil propio");
    info!("   POST /api/order - Crear reserva");
    info!("   POST /api/order/:id/payment - Registrar pago");
    info!("   POST /api/order/:id/cancel - Cancelar reserva");
    info!("🔐 Endpoints admin:");
    info!("   POST /api/store - Crear tienda");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/admin/order - Listar reservas");
    info!("   POST /api/admin/order/:id/confirm - Confirmar reserva");
    info!("   POST /api/admin/user/:id/block - Bloquear usuario");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "rental-marketplace",
        "status": "healthy",
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
