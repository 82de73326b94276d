use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{FuelType, Vehicle};

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub store_id: Uuid,

    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub license_plate: String,

    pub fuel_type: FuelType,

    pub price_per_hour: Decimal,
    pub price_per_day: Option<Decimal>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub model: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub license_plate: Option<String>,

    pub fuel_type: Option<FuelType>,

    pub price_per_hour: Option<Decimal>,
    pub price_per_day: Option<Decimal>,

    /// Interruptor manual del dueño; no confundir con is_active (soft delete)
    pub availability: Option<bool>,
}

/// Filtros para listado admin de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub store_id: Option<Uuid>,
    pub fuel_type: Option<FuelType>,
    pub include_inactive: Option<bool>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub model: Option<String>,
    pub license_plate: String,
    pub fuel_type: FuelType,
    pub price_per_hour: Decimal,
    pub price_per_day: Option<Decimal>,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            store_id: vehicle.store_id,
            name: vehicle.name,
            model: vehicle.model,
            license_plate: vehicle.license_plate,
            fuel_type: vehicle.fuel_type,
            price_per_hour: vehicle.price_per_hour,
            price_per_day: vehicle.price_per_day,
            availability: vehicle.availability,
            created_at: vehicle.created_at,
        }
    }
}
