//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. La conexión a la base de datos y el
//! cliente Redis se construyen en main y se inyectan explícitamente;
//! no hay singletons a nivel de proceso.

use sqlx::PgPool;

use crate::cache::redis_client::RedisClient;
use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub redis: RedisClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, redis: RedisClient) -> Self {
        Self { pool, config, redis }
    }
}
