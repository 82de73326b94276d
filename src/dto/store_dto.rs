use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::store::Store;

/// Request para crear una tienda
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStoreRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 100))]
    pub district: String,

    #[validate(length(min = 5, max = 200))]
    pub address: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: String,

    /// Horario local "HH:MM"
    pub open_time: String,
    pub close_time: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Request para actualizar una tienda existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStoreRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub district: Option<String>,

    #[validate(length(min = 5, max = 200))]
    pub address: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,

    pub open_time: Option<String>,
    pub close_time: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Query para búsqueda de tiendas cercanas
#[derive(Debug, Deserialize)]
pub struct NearbyStoresQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

/// Response de tienda para la API
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub id: Uuid,
    pub name: String,
    pub district: String,
    pub address: String,
    pub phone: String,
    pub open_time: String,
    pub close_time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Store> for StoreResponse {
    fn from(store: Store) -> Self {
        Self {
            id: store.id,
            name: store.name,
            district: store.district,
            address: store.address,
            phone: store.phone,
            open_time: store.open_time,
            close_time: store.close_time,
            latitude: store.latitude,
            longitude: store.longitude,
            created_at: store.created_at,
        }
    }
}
