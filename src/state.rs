use crate::config::Config;
use crate::db::{
    meal_plan_repository::MealPlanRepository, order_repository::OrderRepository,
    session_repository::SessionRepository, user_repository::UserRepository,
};
use crate::services::razorpay::PaymentGateway;
use crate::services::smtp_mailer::Mailer;
use crate::utils::jwt::JwtKeys;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub meal_plans: Arc<dyn MealPlanRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub http_client: Arc<Client>,
    pub config: Arc<Config>,
    pub jwt_keys: Arc<JwtKeys>,
}
