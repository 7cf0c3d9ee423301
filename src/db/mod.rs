pub mod meal_plan_repository;
pub mod order_repository;
pub mod session_repository;
pub mod user_repository;

pub mod postgres_meal_plan_repository;
pub mod postgres_order_repository;
pub mod postgres_session_repository;
pub mod postgres_user_repository;

#[cfg(test)]
pub mod mock_db;
