//! Modelo de Store
//!
//! Este módulo contiene el struct Store que mapea a la tabla stores.
//! La columna canónica de ubicación es `location geometry(Point, 4326)`;
//! las columnas `latitude`/`longitude` son denormalizadas y se mantienen
//! sincronizadas en cada escritura.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Store principal - mapea a la tabla stores (sin la columna geometry,
/// que solo se usa en los predicados espaciales)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub district: String,
    pub address: String,
    pub phone: String,
    pub open_time: String,
    pub close_time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
