use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::order_dto::{CreateOrderRequest, OrderFilters, OrderResponse, RecordPaymentRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::order::{Order, OrderStatus, PaymentStatus};
use crate::models::vehicle::Vehicle;
use crate::repositories::order_repository::OrderRepository;
use crate::repositories::store_repository::StoreRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::availability_service::{AvailabilityService, BookingWindow};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::validate_datetime;

pub struct OrderController {
    repository: OrderRepository,
    vehicles: VehicleRepository,
    availability: AvailabilityService<StoreRepository, VehicleRepository, OrderRepository>,
}

impl OrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: OrderRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            availability: AvailabilityService::new(
                StoreRepository::new(pool.clone()),
                VehicleRepository::new(pool.clone()),
                OrderRepository::new(pool),
            ),
        }
    }

    /// Crear una reserva. El no-solape se revalida aquí, en el momento
    /// de escribir (chequeo optimista); un doble booking que se cuele
    /// entre el chequeo y el INSERT se resuelve por revisión admin.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, AppError> {
        request.validate()?;

        let start = validate_datetime(&request.start_time)
            .map_err(|_| validation_error("start_time", "start_time must be RFC3339"))?;
        let end = validate_datetime(&request.end_time)
            .map_err(|_| validation_error("end_time", "end_time must be RFC3339"))?;
        let window = BookingWindow::new(start, end)?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .filter(|v| v.is_active)
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if !self
            .availability
            .is_vehicle_available(vehicle.id, &window)
            .await?
        {
            return Err(AppError::Conflict(
                "El vehículo no está disponible en esa ventana".to_string(),
            ));
        }

        let total_amount = compute_total(&vehicle, &window);

        let order = self
            .repository
            .create(user.user_id, vehicle.id, vehicle.store_id, window.start, window.end, total_amount)
            .await?;

        Ok(ApiResponse::success_with_message(
            order.into(),
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<OrderResponse, AppError> {
        let order = self.load_visible(user, id).await?;
        Ok(order.into())
    }

    pub async fn list_own(&self, user: &AuthenticatedUser) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.repository.find_by_user(user.user_id).await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    pub async fn list_admin(&self, filters: OrderFilters) -> Result<Vec<OrderResponse>, AppError> {
        let orders = self.repository.find_many(&filters).await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    /// Registrar el pago de una reserva pendiente. La pasarela de pago
    /// es externa: aquí solo se guarda la referencia.
    pub async fn record_payment(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        request: RecordPaymentRequest,
    ) -> Result<ApiResponse<OrderResponse>, AppError> {
        request.validate()?;

        let order = self.load_visible(user, id).await?;

        if order.status != OrderStatus::Pending {
            return Err(AppError::Conflict(
                "Solo las reservas pendientes admiten pago".to_string(),
            ));
        }
        if order.payment_status == PaymentStatus::Paid {
            return Err(AppError::Conflict("La reserva ya está pagada".to_string()));
        }

        let order = self
            .repository
            .update_payment(order.id, PaymentStatus::Paid, Some(request.payment_reference))
            .await?;

        Ok(ApiResponse::success_with_message(
            order.into(),
            "Pago registrado exitosamente".to_string(),
        ))
    }

    /// Cancelación por el cliente, antes de la recogida. Una reserva
    /// pagada pasa a refunded.
    pub async fn cancel(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, AppError> {
        let order = self.load_visible(user, id).await?;

        if !matches!(order.status, OrderStatus::Pending | OrderStatus::Confirmed) {
            return Err(AppError::Conflict(
                "Solo se pueden cancelar reservas pendientes o confirmadas".to_string(),
            ));
        }

        let cancelled = self.cancel_with_refund(order).await?;

        Ok(ApiResponse::success_with_message(
            cancelled.into(),
            "Reserva cancelada exitosamente".to_string(),
        ))
    }

    /// Confirmación por admin; requiere pago registrado
    pub async fn confirm(&self, id: Uuid) -> Result<ApiResponse<OrderResponse>, AppError> {
        let order = self.load(id).await?;

        self.ensure_transition(&order, OrderStatus::Confirmed)?;
        if order.payment_status != PaymentStatus::Paid {
            return Err(AppError::Conflict(
                "No se puede confirmar una reserva sin pago".to_string(),
            ));
        }

        let order = self.repository.update_status(id, OrderStatus::Confirmed).await?;
        Ok(ApiResponse::success_with_message(
            order.into(),
            "Reserva confirmada".to_string(),
        ))
    }

    /// Rechazo por admin: cancela cualquier reserva no terminal
    pub async fn reject(&self, id: Uuid) -> Result<ApiResponse<OrderResponse>, AppError> {
        let order = self.load(id).await?;

        self.ensure_transition(&order, OrderStatus::Cancelled)?;

        let cancelled = self.cancel_with_refund(order).await?;
        Ok(ApiResponse::success_with_message(
            cancelled.into(),
            "Reserva rechazada".to_string(),
        ))
    }

    /// Recogida del vehículo: confirmed -> ongoing
    pub async fn pickup(&self, id: Uuid) -> Result<ApiResponse<OrderResponse>, AppError> {
        let order = self.load(id).await?;
        self.ensure_transition(&order, OrderStatus::Ongoing)?;

        let order = self.repository.update_status(id, OrderStatus::Ongoing).await?;
        Ok(ApiResponse::success_with_message(
            order.into(),
            "Recogida registrada".to_string(),
        ))
    }

    /// Devolución del vehículo: ongoing -> completed
    pub async fn finish(&self, id: Uuid) -> Result<ApiResponse<OrderResponse>, AppError> {
        let order = self.load(id).await?;
        self.ensure_transition(&order, OrderStatus::Completed)?;

        let order = self.repository.update_status(id, OrderStatus::Completed).await?;
        Ok(ApiResponse::success_with_message(
            order.into(),
            "Devolución registrada".to_string(),
        ))
    }

    async fn load(&self, id: Uuid) -> Result<Order, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))
    }

    /// Una reserva solo es visible para su dueño o para un admin
    async fn load_visible(&self, user: &AuthenticatedUser, id: Uuid) -> Result<Order, AppError> {
        let order = self.load(id).await?;

        if order.user_id != user.user_id && !user.is_admin() {
            return Err(AppError::Forbidden(
                "No tienes permiso para acceder a esta reserva".to_string(),
            ));
        }

        Ok(order)
    }

    fn ensure_transition(&self, order: &Order, next: OrderStatus) -> Result<(), AppError> {
        if !order.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Transición inválida: {} -> {}",
                order.status.as_str(),
                next.as_str()
            )));
        }
        Ok(())
    }

    async fn cancel_with_refund(&self, order: Order) -> Result<Order, AppError> {
        let cancelled = self.repository.update_status(order.id, OrderStatus::Cancelled).await?;

        if cancelled.payment_status == PaymentStatus::Paid {
            return self
                .repository
                .update_payment(order.id, PaymentStatus::Refunded, None)
                .await;
        }

        Ok(cancelled)
    }
}

/// Importe total de la reserva: tramos de 24h a precio de día cuando el
/// vehículo tiene tarifa diaria, el resto por horas empezadas
pub fn compute_total(vehicle: &Vehicle, window: &BookingWindow) -> Decimal {
    let seconds = (window.end - window.start).num_seconds();
    let hours = (seconds + 3599) / 3600; // horas empezadas

    match vehicle.price_per_day {
        Some(price_per_day) if hours >= 24 => {
            let days = hours / 24;
            let rest = hours % 24;
            let rest_amount =
                (vehicle.price_per_hour * Decimal::from(rest)).min(price_per_day);
            price_per_day * Decimal::from(days) + rest_amount
        }
        _ => vehicle.price_per_hour * Decimal::from(hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::FuelType;
    use chrono::{Duration, TimeZone, Utc};

    fn vehicle(per_hour: i64, per_day: Option<i64>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            name: "Test".to_string(),
            model: None,
            license_plate: "KA01AB1234".to_string(),
            fuel_type: FuelType::Electric,
            price_per_hour: Decimal::new(per_hour, 0),
            price_per_day: per_day.map(|p| Decimal::new(p, 0)),
            availability: true,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn window(hours: i64, extra_minutes: i64) -> BookingWindow {
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        BookingWindow::new(
            start,
            start + Duration::hours(hours) + Duration::minutes(extra_minutes),
        )
        .unwrap()
    }

    #[test]
    fn test_hourly_pricing_rounds_up_started_hours() {
        let v = vehicle(80, None);
        assert_eq!(compute_total(&v, &window(2, 0)), Decimal::new(160, 0));
        assert_eq!(compute_total(&v, &window(2, 30)), Decimal::new(240, 0));
    }

    #[test]
    fn test_windows_under_one_hour_bill_one_started_hour() {
        let v = vehicle(80, None);
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let half_minute =
            BookingWindow::new(start, start + Duration::seconds(30)).unwrap();
        assert_eq!(compute_total(&v, &half_minute), Decimal::new(80, 0));
        assert_eq!(compute_total(&v, &window(0, 15)), Decimal::new(80, 0));
    }

    #[test]
    fn test_daily_pricing_applies_from_24_hours() {
        let v = vehicle(80, Some(600));
        // 26h = 1 día + 2h
        assert_eq!(compute_total(&v, &window(26, 0)), Decimal::new(760, 0));
        // las horas sueltas nunca superan el precio de un día
        assert_eq!(compute_total(&v, &window(47, 0)), Decimal::new(1200, 0));
    }

    #[test]
    fn test_daily_rate_ignored_below_24_hours() {
        let v = vehicle(80, Some(600));
        assert_eq!(compute_total(&v, &window(10, 0)), Decimal::new(800, 0));
    }
}
