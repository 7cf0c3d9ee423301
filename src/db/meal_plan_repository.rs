use async_trait::async_trait;
use uuid::Uuid;

use crate::models::meal_plan::MealPlan;

#[async_trait]
pub trait MealPlanRepository: Send + Sync {
    /// Look up a plan that is still offered. Inactive plans are treated the
    /// same as missing ones.
    async fn find_active_by_id(&self, plan_id: Uuid) -> Result<Option<MealPlan>, sqlx::Error>;
}
