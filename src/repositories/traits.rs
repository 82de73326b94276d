//! Abstracción de las queries de lectura del pipeline de disponibilidad
//!
//! El servicio de disponibilidad solo depende de estos traits; los
//! repositorios SQL los implementan y los tests usan fakes en memoria.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{order::Order, store::Store, vehicle::Vehicle};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait StoreFinder: Send + Sync {
    /// Tiendas activas dentro del radio (km) alrededor del punto dado.
    /// Un resultado vacío no es error: significa "sin tiendas en rango".
    async fn find_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> AppResult<Vec<Store>>;

    /// Tienda activa por id; None si no existe o está soft-deleted
    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<Store>>;
}

#[async_trait]
pub trait VehicleFinder: Send + Sync {
    /// Vehículos con availability = true e is_active = true en las
    /// tiendas candidatas, en orden de creación (orden estable para
    /// la paginación)
    async fn find_available_in_stores(&self, store_ids: &[Uuid]) -> AppResult<Vec<Vehicle>>;

    /// Vehículo activo por id; None si no existe o está soft-deleted
    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
}

#[async_trait]
pub trait OrderFinder: Send + Sync {
    /// Reservas del vehículo que solapan la ventana semiabierta
    /// [start, end), sin filtrar por estado: la regla de ocupación se
    /// aplica en el servicio.
    async fn find_overlapping(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Order>>;
}
