use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::models::order::Order;

use super::order_repository::{NewOrder, OrderRepository, OrderStats};

const ORDER_COLUMNS: &str = "id, user_id, order_number, total_amount, status, payment_status, \
     gateway_order_id, gateway_payment_id, customer_email, customer_name, customer_phone, \
     meal_plan_id, meal_plan_name, delivery_address, delivery_date, delivery_time_slot, created_at";

pub struct PostgresOrderRepository {
    pub pool: PgPool,
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (
                user_id, order_number, total_amount, status, payment_status,
                gateway_order_id, customer_email, customer_name, customer_phone,
                meal_plan_id, meal_plan_name, delivery_address, delivery_date,
                delivery_time_slot
            )
            VALUES ($1, $2, $3, 'pending'::order_status, 'pending'::payment_status,
                    $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order.user_id)
        .bind(&order.order_number)
        .bind(order.total_amount)
        .bind(&order.gateway_order_id)
        .bind(&order.customer_email)
        .bind(&order.customer_name)
        .bind(&order.customer_phone)
        .bind(order.meal_plan_id)
        .bind(&order.meal_plan_name)
        .bind(&order.delivery_address)
        .bind(&order.delivery_date)
        .bind(&order.delivery_time_slot)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE gateway_order_id = $1"
        ))
        .bind(gateway_order_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn mark_paid(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        // Single conditional update: the WHERE clause makes the check and the
        // write one atomic statement, so a concurrent duplicate delivery sees
        // zero affected rows instead of firing twice.
        sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = 'confirmed'::order_status,
                payment_status = 'paid'::payment_status,
                gateway_payment_id = $2
            WHERE gateway_order_id = $1 AND payment_status <> 'paid'::payment_status
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(gateway_order_id)
        .bind(gateway_payment_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn order_stats(&self) -> Result<OrderStats, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_orders,
                   COUNT(*) FILTER (WHERE payment_status = 'paid'::payment_status) AS paid_orders,
                   COALESCE(SUM(total_amount) FILTER (WHERE payment_status = 'paid'::payment_status), 0)::BIGINT AS revenue
            FROM orders
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(OrderStats {
            total_orders: row.try_get("total_orders")?,
            paid_orders: row.try_get("paid_orders")?,
            revenue: row.try_get("revenue")?,
        })
    }
}
