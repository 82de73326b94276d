//! Modelo de Order
//!
//! Este módulo contiene el struct Order (reserva de un vehículo) y sus
//! enums de estado. La ventana de reserva es semiabierta:
//! `[start_time, end_time)`, el instante final queda excluido para
//! permitir reservas consecutivas.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la reserva - mapea al ENUM order_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Ongoing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Ongoing => "ongoing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Estados terminales: ya no admiten transición alguna
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Transiciones permitidas del ciclo de vida:
    /// pending -> confirmed -> ongoing -> completed,
    /// y cualquier estado no terminal -> cancelled.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (OrderStatus::Pending, OrderStatus::Confirmed) => true,
            (OrderStatus::Confirmed, OrderStatus::Ongoing) => true,
            (OrderStatus::Ongoing, OrderStatus::Completed) => true,
            (from, OrderStatus::Cancelled) if !from.is_terminal() => true,
            _ => false,
        }
    }
}

/// Estado del pago - mapea al ENUM payment_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// Order principal - mapea exactamente a la tabla orders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
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

impl Order {
    /// Una reserva ocupa el vehículo si su combinación de estado y pago
    /// representa una retención viva: confirmed/ongoing siempre bloquean;
    /// pending solo bloquea una vez pagada (los carritos sin pagar se
    /// consideran abandonables). Cancelled y completed nunca bloquean.
    pub fn is_occupying(&self) -> bool {
        match self.status {
            OrderStatus::Confirmed | OrderStatus::Ongoing => true,
            OrderStatus::Pending => self.payment_status == PaymentStatus::Paid,
            OrderStatus::Completed | OrderStatus::Cancelled => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Ongoing));
        assert!(OrderStatus::Ongoing.can_transition_to(OrderStatus::Completed));

        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Ongoing));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Ongoing));
    }

    #[test]
    fn test_any_live_state_can_cancel() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Ongoing.can_transition_to(OrderStatus::Cancelled));

        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
    }
}
