use serde::{Deserialize, Serialize};
use sqlx::{prelude::Type, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "order_status")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    // Reachable only by explicit business decision, never by the payment flow.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "payment_status")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// An order as persisted. Created `pending`/`pending` the moment the gateway
/// mints a remote order id, flipped to `confirmed`/`paid` exactly once, keyed
/// by `gateway_order_id`. Never transitions backward, never deleted here.
#[derive(Debug, FromRow, Serialize, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_number: String,
    /// Smallest currency unit (paise).
    pub total_amount: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub gateway_order_id: String,
    pub gateway_payment_id: Option<String>,
    pub customer_email: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub meal_plan_id: Uuid,
    pub meal_plan_name: String,
    pub delivery_address: Option<String>,
    pub delivery_date: Option<String>,
    pub delivery_time_slot: Option<String>,
    pub created_at: OffsetDateTime,
}
