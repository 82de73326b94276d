//! Tests de escenario del pipeline de disponibilidad, sobre fakes en
//! memoria de los repositorios.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use rental_marketplace::models::order::{Order, OrderStatus, PaymentStatus};
use rental_marketplace::models::store::Store;
use rental_marketplace::models::vehicle::{FuelType, Vehicle};
use rental_marketplace::repositories::traits::{OrderFinder, StoreFinder, VehicleFinder};
use rental_marketplace::services::availability_service::{
    windows_overlap, AvailabilityService, BookingWindow, PageParams, SearchArea,
};
use rental_marketplace::utils::errors::{AppError, AppResult};

struct InMemoryStores(Vec<Store>);
struct InMemoryVehicles(Vec<Vehicle>);
struct InMemoryOrders(Vec<Order>);

fn km_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let r = 6371.0;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * r * a.sqrt().asin()
}

#[async_trait]
impl StoreFinder for InMemoryStores {
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
                s.is_active && km_between(latitude, longitude, s.latitude, s.longitude) <= radius_km
            })
            .cloned()
            .collect())
    }

    async fn find_active_by_id(&self, id: Uuid) -> AppResult<Option<Store>> {
        Ok(self.0.iter().find(|s| s.id == id && s.is_active).cloned())
    }
}

#[async_trait]
impl VehicleFinder for InMemoryVehicles {
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
impl OrderFinder for InMemoryOrders {
    async fn find_overlapping(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Order>> {
        Ok(self
            .0
            .iter()
            .filter(|o| o.vehicle_id == vehicle_id && windows_overlap(o.start_time, o.end_time, start, end))
            .cloned()
            .collect())
    }
}

fn bangalore_store() -> Store {
    Store {
        id: Uuid::new_v4(),
        name: "Store A".to_string(),
        district: "Bangalore".to_string(),
        address: "MG Road".to_string(),
        phone: "+919876543210".to_string(),
        open_time: "08:00".to_string(),
        close_time: "22:00".to_string(),
        latitude: 12.97,
        longitude: 77.59,
        is_active: true,
        created_at: Utc::now(),
    }
}

fn vehicle_in(store_id: Uuid, n: u32) -> Vehicle {
    Vehicle {
        id: Uuid::new_v4(),
        store_id,
        name: format!("Vehicle {}", n),
        model: None,
        license_plate: format!("KA01X{:04}", n),
        fuel_type: FuelType::Petrol,
        price_per_hour: Decimal::new(80, 0),
        price_per_day: None,
        availability: true,
        is_active: true,
        created_at: Utc::now() + chrono::Duration::seconds(n as i64),
    }
}

fn confirmed_order(vehicle_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) -> Order {
    Order {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        vehicle_id,
        store_id: Uuid::new_v4(),
        start_time: start,
        end_time: end,
        status: OrderStatus::Confirmed,
        payment_status: PaymentStatus::Paid,
        total_amount: Decimal::new(160, 0),
        payment_reference: Some("pay_test".to_string()),
        created_at: Utc::now(),
    }
}

fn utc(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, h, 0, 0).unwrap()
}

/// Escenario del ejemplo de referencia: Store A en (12.97, 77.59), V1
/// con una reserva confirmada 10:00-12:00Z. La ventana 11:00-13:00Z
/// debe excluir V1; la ventana 12:00-14:00Z debe incluirlo.
#[tokio::test]
async fn reference_scenario_overlap_and_back_to_back() {
    let store = bangalore_store();
    let v1 = vehicle_in(store.id, 1);
    let v1_id = v1.id;

    let service = AvailabilityService::new(
        InMemoryStores(vec![store]),
        InMemoryVehicles(vec![v1]),
        InMemoryOrders(vec![confirmed_order(v1_id, utc(10), utc(12))]),
    );

    let area = SearchArea::Near {
        latitude: 12.97,
        longitude: 77.59,
        radius_km: 5.0,
    };
    let params = PageParams::new(None, None).unwrap();

    let overlapping = BookingWindow::new(utc(11), utc(13)).unwrap();
    let page = service.search(area, overlapping, params).await.unwrap();
    assert!(page.items.is_empty(), "V1 debe quedar excluido");

    let back_to_back = BookingWindow::new(utc(12), utc(14)).unwrap();
    let page = service.search(area, back_to_back, params).await.unwrap();
    assert_eq!(page.items.len(), 1, "V1 debe estar disponible");
    assert_eq!(page.items[0].id, v1_id);
}

/// Escenario del ejemplo de paginación: 25 vehículos, limit=10, page=3
/// devuelve los vehículos 21-25 con has_next=false y has_prev=true.
#[tokio::test]
async fn pagination_scenario_25_vehicles() {
    let store = bangalore_store();
    let vehicles: Vec<Vehicle> = (1..=25).map(|n| vehicle_in(store.id, n)).collect();
    let store_id = store.id;

    let service = AvailabilityService::new(
        InMemoryStores(vec![store]),
        InMemoryVehicles(vehicles),
        InMemoryOrders(vec![]),
    );

    let window = BookingWindow::new(utc(10), utc(12)).unwrap();
    let params = PageParams::new(Some(3), Some(10)).unwrap();

    let page = service
        .search(SearchArea::Store(store_id), window, params)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);
    assert!(!page.has_next);
    assert!(page.has_prev);
    assert_eq!(page.items[0].name, "Vehicle 21");
    assert_eq!(page.items[4].name, "Vehicle 25");
}

#[tokio::test]
async fn validation_rejects_before_touching_the_store() {
    // Los fakes vacíos harían fallar cualquier búsqueda por id; si la
    // validación llega a ejecutarse primero, nunca se consultan
    let service = AvailabilityService::new(
        InMemoryStores(vec![]),
        InMemoryVehicles(vec![]),
        InMemoryOrders(vec![]),
    );

    // ventana invertida
    assert!(BookingWindow::new(utc(12), utc(10)).is_err());

    // radio inválido
    let params = PageParams::new(None, None).unwrap();
    let window = BookingWindow::new(utc(10), utc(12)).unwrap();
    let result = service
        .search(
            SearchArea::Near {
                latitude: 12.97,
                longitude: 77.59,
                radius_km: -1.0,
            },
            window,
            params,
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    // límite fuera de rango
    assert!(PageParams::new(Some(1), Some(100)).is_err());
}

#[tokio::test]
async fn only_occupying_bookings_block() {
    let store = bangalore_store();
    let v1 = vehicle_in(store.id, 1);
    let v1_id = v1.id;
    let store_id = store.id;

    let mut unpaid_pending = confirmed_order(v1_id, utc(10), utc(12));
    unpaid_pending.status = OrderStatus::Pending;
    unpaid_pending.payment_status = PaymentStatus::Pending;

    let mut refunded_cancelled = confirmed_order(v1_id, utc(10), utc(12));
    refunded_cancelled.status = OrderStatus::Cancelled;
    refunded_cancelled.payment_status = PaymentStatus::Refunded;

    let service = AvailabilityService::new(
        InMemoryStores(vec![store]),
        InMemoryVehicles(vec![v1]),
        InMemoryOrders(vec![unpaid_pending, refunded_cancelled]),
    );

    let window = BookingWindow::new(utc(10), utc(12)).unwrap();
    let params = PageParams::new(None, None).unwrap();

    let page = service
        .search(SearchArea::Store(store_id), window, params)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1, "ni pending sin pagar ni cancelled bloquean");
}
