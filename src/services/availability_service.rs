//! Resolución de disponibilidad
//!
//! El pipeline de búsqueda de vehículos disponibles:
//! filtro geográfico de tiendas -> filtro de vehículos candidatos ->
//! chequeo de conflictos de reserva -> paginación.
//!
//! Las cuatro etapas son lecturas puras sobre los repositorios; ninguna
//! muta estado. Una lectura desfasada (una reserva confirmada
//! microsegundos después del chequeo) es una carrera aceptada: el camino
//! de creación de reservas revalida el no-solape en el momento de
//! escribir.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::repositories::traits::{OrderFinder, StoreFinder, VehicleFinder};
use crate::utils::errors::{validation_error, AppError, AppResult};

/// Límite máximo de elementos por página
pub const MAX_PAGE_LIMIT: i64 = 50;
/// Límite por defecto cuando el caller no lo indica
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Ventana de reserva semiabierta [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BookingWindow {
    /// Rechaza ventanas vacías o invertidas antes de tocar la base
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, AppError> {
        if end <= start {
            return Err(validation_error(
                "end_time",
                "end_time must be after start_time",
            ));
        }
        Ok(Self { start, end })
    }
}

/// Dónde buscar: una tienda explícita o un círculo geográfico
#[derive(Debug, Clone, Copy)]
pub enum SearchArea {
    Store(Uuid),
    Near {
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    },
}

impl SearchArea {
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            SearchArea::Store(_) => Ok(()),
            SearchArea::Near {
                latitude,
                longitude,
                radius_km,
            } => {
                if !(-90.0..=90.0).contains(latitude) {
                    return Err(validation_error(
                        "latitude",
                        "latitude must be between -90 and 90",
                    ));
                }
                if !(-180.0..=180.0).contains(longitude) {
                    return Err(validation_error(
                        "longitude",
                        "longitude must be between -180 and 180",
                    ));
                }
                if *radius_km <= 0.0 {
                    return Err(validation_error(
                        "radius_km",
                        "radius must be greater than zero",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Parámetros de paginación ya validados.
/// `page`/`limit` ausentes toman el valor por defecto; valores
/// explícitos fuera de rango se rechazan, nunca se corrigen en silencio.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(validation_error("page", "page must be at least 1"));
        }

        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(validation_error("limit", "limit must be between 1 and 50"));
        }

        Ok(Self { page, limit })
    }
}

/// Página de resultados con totales derivados
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Paginated<T> {
    pub fn empty(params: PageParams) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: params.page,
            limit: params.limit,
            total_pages: 0,
            has_next: false,
            has_prev: params.page > 1,
        }
    }
}

/// Test de solape de intervalos semiabiertos. Las desigualdades son
/// estrictas: reservas espalda con espalda no entran en conflicto.
pub fn windows_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Recorte estable de la lista ya filtrada. Una página más allá del
/// final devuelve un slice vacío con totales correctos, no un error.
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> Paginated<T> {
    let total = items.len() as i64;
    let total_pages = (total + params.limit - 1) / params.limit;

    let offset = (params.page - 1) * params.limit;
    let page_items: Vec<T> = items
        .into_iter()
        .skip(offset as usize)
        .take(params.limit as usize)
        .collect();

    Paginated {
        items: page_items,
        total,
        page: params.page,
        limit: params.limit,
        total_pages,
        has_next: params.page < total_pages,
        has_prev: params.page > 1,
    }
}

/// Servicio de disponibilidad. Los repositorios se inyectan por
/// constructor; el servicio no conoce la base de datos concreta.
pub struct AvailabilityService<S, V, O> {
    stores: S,
    vehicles: V,
    orders: O,
}

impl<S, V, O> AvailabilityService<S, V, O>
where
    S: StoreFinder,
    V: VehicleFinder,
    O: OrderFinder,
{
    pub fn new(stores: S, vehicles: V, orders: O) -> Self {
        Self {
            stores,
            vehicles,
            orders,
        }
    }

    /// Operación completa de búsqueda:
    /// tiendas candidatas -> vehículos candidatos -> chequeo de
    /// conflictos por vehículo -> paginación.
    pub async fn search(
        &self,
        area: SearchArea,
        window: BookingWindow,
        params: PageParams,
    ) -> AppResult<Paginated<Vehicle>> {
        area.validate()?;

        let store_ids = match area {
            SearchArea::Store(id) => {
                // Un id explícito desconocido es NotFound, distinto del
                // resultado vacío legítimo de una búsqueda por radio
                let store = self
                    .stores
                    .find_active_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Store with id '{}' not found", id)))?;
                vec![store.id]
            }
            SearchArea::Near {
                latitude,
                longitude,
                radius_km,
            } => {
                let stores = self.stores.find_near(latitude, longitude, radius_km).await?;
                if stores.is_empty() {
                    // Sin tiendas en rango: corto circuito a lista vacía
                    return Ok(Paginated::empty(params));
                }
                stores.into_iter().map(|s| s.id).collect()
            }
        };

        let candidates = self.vehicles.find_available_in_stores(&store_ids).await?;

        // Chequeos independientes y sin efectos; el loop es secuencial
        let mut free = Vec::with_capacity(candidates.len());
        for vehicle in candidates {
            if !self.has_occupying_conflict(vehicle.id, &window).await? {
                free.push(vehicle);
            }
        }

        Ok(paginate(free, params))
    }

    /// Chequeo puntual usado por la creación de reservas (revalidación
    /// optimista en escritura). Un vehículo inexistente o soft-deleted
    /// se reporta como no disponible, no como error.
    pub async fn is_vehicle_available(
        &self,
        vehicle_id: Uuid,
        window: &BookingWindow,
    ) -> AppResult<bool> {
        let vehicle = match self.vehicles.find_active_by_id(vehicle_id).await? {
            Some(v) => v,
            None => return Ok(false),
        };

        if !vehicle.availability {
            return Ok(false);
        }

        Ok(!self.has_occupying_conflict(vehicle.id, window).await?)
    }

    /// True si alguna reserva ocupante solapa la ventana. La regla de
    /// ocupación vive en Order::is_occupying; aquí solo se aplica sobre
    /// las filas que ya solapan temporalmente.
    async fn has_occupying_conflict(
        &self,
        vehicle_id: Uuid,
        window: &BookingWindow,
    ) -> AppResult<bool> {
        let overlapping = self
            .orders
            .find_overlapping(vehicle_id, window.start, window.end)
            .await?;

        Ok(overlapping.iter().any(|order| order.is_occupying()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{Order, OrderStatus, PaymentStatus};
    use crate::models::store::Store;
    use crate::models::vehicle::FuelType;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    struct FakeStores(Vec<Store>);
    struct FakeVehicles(Vec<Vehicle>);
    struct FakeOrders(Vec<Order>);

    fn km_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        // Haversine, suficiente para los fakes de test
        let r = 6371.0;
        let d_lat = (lat2 - lat1).to_radians();
        let d_lon = (lon2 - lon1).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * r * a.sqrt().asin()
    }

    #[async_trait]
    impl StoreFinder for FakeStores {
        async fn find_near(
            &self,
            latitude: f64,
            longitude: f64,
            radius_km: f64,
        ) -> AppResult<Vec<Store>> {
            Ok(self
                .0
                .iter()
                .filter(|s| {
                    s.is_active
                        && km_between(latitude, longitude, s.latitude, s.longitude) <= radius_km
                })
                .cloned()
                .collect())
        }

        async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<Store>> {
            Ok(self.0.iter().find(|s| s.id == id && s.is_active).cloned())
        }
    }

    #[async_trait]
    impl VehicleFinder for FakeVehicles {
        async fn find_available_in_stores(&self, store_ids: &[Uuid]) -> AppResult<Vec<Vehicle>> {
            Ok(self
                .0
                .iter()
                .filter(|v| store_ids.contains(&v.store_id) && v.availability && v.is_active)
                .cloned()
                .collect())
        }

        async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
            Ok(self.0.iter().find(|v| v.id == id && v.is_active).cloned())
        }
    }

    #[async_trait]
    impl OrderFinder for FakeOrders {
        async fn find_overlapping(
            &self,
            vehicle_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> AppResult<Vec<Order>> {
            Ok(self
                .0
                .iter()
                .filter(|o| {
                    o.vehicle_id == vehicle_id
                        && windows_overlap(o.start_time, o.end_time, start, end)
                })
                .cloned()
                .collect())
        }
    }

    fn store_at(latitude: f64, longitude: f64) -> Store {
        Store {
            id: Uuid::new_v4(),
            name: "Test Store".to_string(),
            district: "Indiranagar".to_string(),
            address: "100 Feet Road".to_string(),
            phone: "+919876543210".to_string(),
            open_time: "08:00".to_string(),
            close_time: "22:00".to_string(),
            latitude,
            longitude,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn vehicle_at(store_id: Uuid) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            store_id,
            name: "Activa 6G".to_string(),
            model: Some("2023".to_string()),
            license_plate: format!("KA01{}", &Uuid::new_v4().to_string()[..6]),
            fuel_type: FuelType::Petrol,
            price_per_hour: Decimal::new(80, 0),
            price_per_day: Some(Decimal::new(600, 0)),
            availability: true,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn order_for(
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: OrderStatus,
        payment_status: PaymentStatus,
    ) -> Order {
        Order {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            vehicle_id,
            store_id: Uuid::new_v4(),
            start_time: start,
            end_time: end,
            status,
            payment_status,
            total_amount: Decimal::new(160, 0),
            payment_reference: None,
            created_at: Utc::now(),
        }
    }

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, h, 0, 0).unwrap()
    }

    #[test]
    fn test_window_rejects_empty_or_inverted() {
        assert!(BookingWindow::new(at(10), at(10)).is_err());
        assert!(BookingWindow::new(at(12), at(10)).is_err());
        assert!(BookingWindow::new(at(10), at(12)).is_ok());
    }

    #[test]
    fn test_area_validation() {
        assert!(SearchArea::Near { latitude: 91.0, longitude: 0.0, radius_km: 5.0 }
            .validate()
            .is_err());
        assert!(SearchArea::Near { latitude: 0.0, longitude: -181.0, radius_km: 5.0 }
            .validate()
            .is_err());
        assert!(SearchArea::Near { latitude: 12.97, longitude: 77.59, radius_km: 0.0 }
            .validate()
            .is_err());
        assert!(SearchArea::Near { latitude: 12.97, longitude: 77.59, radius_km: 5.0 }
            .validate()
            .is_ok());
    }

    #[test]
    fn test_page_params_defaults_and_bounds() {
        let p = PageParams::new(None, None).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, DEFAULT_PAGE_LIMIT);

        assert!(PageParams::new(Some(0), None).is_err());
        assert!(PageParams::new(None, Some(0)).is_err());
        assert!(PageParams::new(None, Some(51)).is_err());
        assert!(PageParams::new(Some(3), Some(50)).is_ok());
    }

    #[test]
    fn test_windows_overlap_strict_bounds() {
        // [10,12) contra [12,14): adyacentes, sin conflicto
        assert!(!windows_overlap(at(10), at(12), at(12), at(14)));
        assert!(!windows_overlap(at(8), at(10), at(10), at(12)));
        // solape parcial y total
        assert!(windows_overlap(at(10), at(12), at(11), at(13)));
        assert!(windows_overlap(at(10), at(14), at(11), at(12)));
        assert!(windows_overlap(at(11), at(12), at(10), at(14)));
    }

    #[test]
    fn test_paginate_slices_and_totals() {
        let items: Vec<i32> = (1..=25).collect();
        let page3 = paginate(items.clone(), PageParams { page: 3, limit: 10 });

        assert_eq!(page3.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page3.total, 25);
        assert_eq!(page3.total_pages, 3);
        assert!(!page3.has_next);
        assert!(page3.has_prev);

        // más allá del final: vacío con totales correctos
        let page9 = paginate(items.clone(), PageParams { page: 9, limit: 10 });
        assert!(page9.items.is_empty());
        assert_eq!(page9.total, 25);
        assert!(!page9.has_next);

        // la suma de todas las páginas cubre el total, para cualquier limit
        for limit in 1..=25i64 {
            let total_pages = (25 + limit - 1) / limit;
            let mut seen = 0;
            for page in 1..=total_pages {
                seen += paginate(items.clone(), PageParams { page, limit }).items.len();
            }
            assert_eq!(seen, 25, "limit {}", limit);
        }
    }

    fn service_with(
        stores: Vec<Store>,
        vehicles: Vec<Vehicle>,
        orders: Vec<Order>,
    ) -> AvailabilityService<FakeStores, FakeVehicles, FakeOrders> {
        AvailabilityService::new(FakeStores(stores), FakeVehicles(vehicles), FakeOrders(orders))
    }

    #[tokio::test]
    async fn test_confirmed_booking_blocks_overlapping_window() {
        let store = store_at(12.97, 77.59);
        let vehicle = vehicle_at(store.id);
        let booked = order_for(vehicle.id, at(10), at(12), OrderStatus::Confirmed, PaymentStatus::Paid);
        let service = service_with(vec![store], vec![vehicle], vec![booked]);

        let area = SearchArea::Near { latitude: 12.97, longitude: 77.59, radius_km: 5.0 };
        let params = PageParams::new(None, None).unwrap();

        // [11,13) solapa con [10,12): excluido
        let window = BookingWindow::new(at(11), at(13)).unwrap();
        let result = service.search(area, window, params).await.unwrap();
        assert!(result.items.is_empty());

        // [12,14) es espalda con espalda: incluido
        let window = BookingWindow::new(at(12), at(14)).unwrap();
        let result = service.search(area, window, params).await.unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.total, 1);
    }

    #[tokio::test]
    async fn test_occupying_rule_is_asymmetric() {
        let store = store_at(12.97, 77.59);
        let vehicle = vehicle_at(store.id);
        let vehicle_id = vehicle.id;

        let area = SearchArea::Near { latitude: 12.97, longitude: 77.59, radius_km: 5.0 };
        let params = PageParams::new(None, None).unwrap();
        let window = BookingWindow::new(at(10), at(12)).unwrap();

        // pending sin pagar no bloquea
        let service = service_with(
            vec![store.clone()],
            vec![vehicle.clone()],
            vec![order_for(vehicle_id, at(10), at(12), OrderStatus::Pending, PaymentStatus::Pending)],
        );
        assert_eq!(service.search(area, window, params).await.unwrap().items.len(), 1);

        // pending pagada sí bloquea
        let service = service_with(
            vec![store.clone()],
            vec![vehicle.clone()],
            vec![order_for(vehicle_id, at(10), at(12), OrderStatus::Pending, PaymentStatus::Paid)],
        );
        assert!(service.search(area, window, params).await.unwrap().items.is_empty());

        // confirmada bloquea aunque no esté pagada
        let service = service_with(
            vec![store.clone()],
            vec![vehicle.clone()],
            vec![order_for(vehicle_id, at(10), at(12), OrderStatus::Confirmed, PaymentStatus::Pending)],
        );
        assert!(service.search(area, window, params).await.unwrap().items.is_empty());

        // cancelada nunca bloquea, aunque esté pagada
        let service = service_with(
            vec![store.clone()],
            vec![vehicle.clone()],
            vec![order_for(vehicle_id, at(10), at(12), OrderStatus::Cancelled, PaymentStatus::Paid)],
        );
        assert_eq!(service.search(area, window, params).await.unwrap().items.len(), 1);

        // completada nunca bloquea
        let service = service_with(
            vec![store],
            vec![vehicle],
            vec![order_for(vehicle_id, at(10), at(12), OrderStatus::Completed, PaymentStatus::Paid)],
        );
        assert_eq!(service.search(area, window, params).await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn test_no_stores_in_range_short_circuits() {
        let store = store_at(12.97, 77.59);
        let vehicle = vehicle_at(store.id);
        let service = service_with(vec![store], vec![vehicle], vec![]);

        // Mumbai está a ~840 km de Bangalore
        let area = SearchArea::Near { latitude: 19.07, longitude: 72.87, radius_km: 5.0 };
        let params = PageParams::new(None, None).unwrap();
        let window = BookingWindow::new(at(10), at(12)).unwrap();

        let result = service.search(area, window, params).await.unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
    }

    #[tokio::test]
    async fn test_unknown_explicit_store_is_not_found() {
        let service = service_with(vec![], vec![], vec![]);
        let params = PageParams::new(None, None).unwrap();
        let window = BookingWindow::new(at(10), at(12)).unwrap();

        let result = service
            .search(SearchArea::Store(Uuid::new_v4()), window, params)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_disabled_and_inactive_vehicles_are_never_returned() {
        let store = store_at(12.97, 77.59);
        let mut disabled = vehicle_at(store.id);
        disabled.availability = false;
        let mut deleted = vehicle_at(store.id);
        deleted.is_active = false;
        let active = vehicle_at(store.id);
        let active_id = active.id;

        let service = service_with(vec![store.clone()], vec![disabled, deleted, active], vec![]);

        let params = PageParams::new(None, None).unwrap();
        let window = BookingWindow::new(at(10), at(12)).unwrap();
        let result = service
            .search(SearchArea::Store(store.id), window, params)
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].id, active_id);
    }

    #[tokio::test]
    async fn test_unknown_vehicle_reports_not_available() {
        let service = service_with(vec![], vec![], vec![]);
        let window = BookingWindow::new(at(10), at(12)).unwrap();

        let available = service
            .is_vehicle_available(Uuid::new_v4(), &window)
            .await
            .unwrap();
        assert!(!available);
    }
}
