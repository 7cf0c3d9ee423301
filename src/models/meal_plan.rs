use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Clone)]
pub struct MealPlan {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// List price in rupees.
    pub price: i64,
    /// Price actually charged, in rupees. The gateway is billed this * 100.
    pub discounted_price: i64,
    pub duration_days: i32,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}
