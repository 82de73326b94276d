use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::order::{Order, OrderStatus, PaymentStatus};

/// Request para crear una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub vehicle_id: Uuid,

    /// RFC3339; la ventana es semiabierta [start_time, end_time)
    pub start_time: String,
    pub end_time: String,
}

/// Request para registrar el pago de una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    #[validate(length(min = 4, max = 100))]
    pub payment_reference: String,
}

/// Filtros para listado admin de reservas
#[derive(Debug, Deserialize)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    pub store_id: Option<Uuid>,
}

/// Response de reserva para la API
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub store_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: Decimal,
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            vehicle_id: order.vehicle_id,
            store_id: order.store_id,
            start_time: order.start_time,
            end_time: order.end_time,
            status: order.status,
            payment_status: order.payment_status,
            total_amount: order.total_amount,
            payment_reference: order.payment_reference,
            created_at: order.created_at,
        }
    }
}
