use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::order_dto::OrderFilters;
use crate::models::order::{Order, OrderStatus, PaymentStatus};
use crate::repositories::traits::OrderFinder;
use crate::utils::errors::{AppError, AppResult};

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        store_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        total_amount: Decimal,
    ) -> Result<Order, AppError> {
        let id = Uuid::new_v4();

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, user_id, vehicle_id, store_id, start_time, end_time,
                                status, payment_status, total_amount, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending', 'pending', $7, NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(vehicle_id)
        .bind(store_id)
        .bind(start_time)
        .bind(end_time)
        .bind(total_amount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error creating order: {}", e)))?;

        Ok(order)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Error finding order: {}", e)))?;

        Ok(order)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error listing orders: {}", e)))?;

        Ok(orders)
    }

    pub async fn find_many(&self, filters: &OrderFilters) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE ($1::order_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR store_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filters.status)
        .bind(filters.store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error listing orders: {}", e)))?;

        Ok(orders)
    }

    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error updating order status: {}", e)))?;

        Ok(order)
    }

    pub async fn update_payment(
        &self,
        id: Uuid,
        payment_status: PaymentStatus,
        payment_reference: Option<String>,
    ) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET payment_status = $2,
                payment_reference = COALESCE($3, payment_reference)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payment_status)
        .bind(payment_reference)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error updating payment: {}", e)))?;

        Ok(order)
    }
}

#[async_trait]
impl OrderFinder for OrderRepository {
    /// Test de solape de intervalos semiabiertos con desigualdades
    /// estrictas: una reserva que termina exactamente en `start` o que
    /// empieza exactamente en `end` no solapa.
    async fn find_overlapping(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE vehicle_id = $1
              AND start_time < $3
              AND end_time > $2
            "#,
        )
        .bind(vehicle_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error finding overlapping orders: {}", e)))?;

        Ok(orders)
    }
}
