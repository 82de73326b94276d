use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::vehicle_dto::VehicleResponse;

/// Query params de la búsqueda de vehículos disponibles.
/// Se indica `store_id` O un círculo (latitude, longitude, radius_km).
#[derive(Debug, Deserialize)]
pub struct AvailableVehiclesQuery {
    pub store_id: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,

    /// RFC3339; ventana semiabierta [start_time, end_time)
    pub start_time: String,
    pub end_time: String,

    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Response paginada de la búsqueda de disponibilidad
#[derive(Debug, Serialize)]
pub struct AvailableVehiclesResponse {
    pub vehicles: Vec<VehicleResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}
