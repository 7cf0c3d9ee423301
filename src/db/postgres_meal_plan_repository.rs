use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::meal_plan::MealPlan;

use super::meal_plan_repository::MealPlanRepository;

pub struct PostgresMealPlanRepository {
    pub pool: PgPool,
}

#[async_trait]
impl MealPlanRepository for PostgresMealPlanRepository {
    async fn find_active_by_id(&self, plan_id: Uuid) -> Result<Option<MealPlan>, sqlx::Error> {
        sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, name, description, price, discounted_price, duration_days,
                   is_active, created_at
            FROM meal_plans
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(plan_id)
        .fetch_optional(&self.pool)
        .await
    }
}
