use async_trait::async_trait;
use uuid::Uuid;

use crate::models::order::Order;

/// Insert payload for a new pending order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub order_number: String,
    pub total_amount: i64,
    pub gateway_order_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub meal_plan_id: Uuid,
    pub meal_plan_name: String,
    pub delivery_address: Option<String>,
    pub delivery_date: Option<String>,
    pub delivery_time_slot: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total_orders: i64,
    pub paid_orders: i64,
    /// Sum of `total_amount` over paid orders, in paise.
    pub revenue: i64,
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, sqlx::Error>;

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, sqlx::Error>;

    /// Conditionally flip the order to `confirmed`/`paid` and record the
    /// gateway payment id. Returns the updated row only when this call
    /// performed the transition; `None` means the order was already paid.
    /// The check-then-write is a single statement, so concurrent duplicate
    /// deliveries flip the row at most once.
    async fn mark_paid(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
    ) -> Result<Option<Order>, sqlx::Error>;

    async fn order_stats(&self) -> Result<OrderStats, sqlx::Error>;
}
