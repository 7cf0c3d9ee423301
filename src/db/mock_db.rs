use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::meal_plan::MealPlan;
use crate::models::order::{Order, OrderStatus, PaymentStatus};
use crate::models::user::User;

use super::meal_plan_repository::MealPlanRepository;
use super::order_repository::{NewOrder, OrderRepository, OrderStats};
use super::session_repository::SessionRepository;
use super::user_repository::UserRepository;

fn mock_failure() -> sqlx::Error {
    sqlx::Error::Protocol("Mock DB failure".into())
}

#[derive(Default)]
pub struct MockUserRepository {
    pub users: Mutex<Vec<User>>,
    pub should_fail: bool,
    pub last_login_updates: Mutex<Vec<(Uuid, OffsetDateTime)>>,
}

impl MockUserRepository {
    pub fn with_user(user: User) -> Self {
        Self {
            users: Mutex::new(vec![user]),
            ..Default::default()
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn upsert_guest(
        &self,
        email: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.email.eq_ignore_ascii_case(email)) {
            existing.name = name.to_string();
            if let Some(phone) = phone {
                existing.phone = Some(phone.to_string());
            }
            return Ok(existing.clone());
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            name: name.to_string(),
            password_hash: String::new(),
            role: crate::models::user::UserRole::User,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn touch_last_login(
        &self,
        user_id: Uuid,
        at: OffsetDateTime,
    ) -> Result<(), sqlx::Error> {
        self.last_login_updates.lock().unwrap().push((user_id, at));
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, sqlx::Error> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct MockSessionRepository {
    /// token -> (user_id, expires_at)
    pub sessions: Mutex<HashMap<String, (Uuid, OffsetDateTime)>>,
    pub should_fail: bool,
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: OffsetDateTime,
        _ip: Option<&str>,
        _user_agent: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        self.sessions
            .lock()
            .unwrap()
            .insert(token.to_string(), (user_id, expires_at));
        Ok(())
    }

    async fn is_live(&self, token: &str) -> Result<bool, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(token)
            .is_some_and(|(_, expires_at)| *expires_at > OffsetDateTime::now_utc()))
    }

    async fn revoke(&self, token: &str) -> Result<(), sqlx::Error> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, (_, expires_at)| *expires_at > OffsetDateTime::now_utc());
        Ok((before - sessions.len()) as u64)
    }
}

#[derive(Default)]
pub struct MockOrderRepository {
    pub orders: Mutex<Vec<Order>>,
    pub should_fail: bool,
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        let row = Order {
            id: Uuid::new_v4(),
            user_id: order.user_id,
            order_number: order.order_number,
            total_amount: order.total_amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            gateway_order_id: order.gateway_order_id,
            gateway_payment_id: None,
            customer_email: order.customer_email,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            meal_plan_id: order.meal_plan_id,
            meal_plan_name: order.meal_plan_name,
            delivery_address: order.delivery_address,
            delivery_date: order.delivery_date,
            delivery_time_slot: order.delivery_time_slot,
            created_at: OffsetDateTime::now_utc(),
        };
        self.orders.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.gateway_order_id == gateway_order_id)
            .cloned())
    }

    async fn mark_paid(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        // The lock spans the check and the write, mirroring the conditional
        // UPDATE's atomicity.
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| {
            o.gateway_order_id == gateway_order_id && o.payment_status != PaymentStatus::Paid
        }) {
            Some(order) => {
                order.status = OrderStatus::Confirmed;
                order.payment_status = PaymentStatus::Paid;
                order.gateway_payment_id = Some(gateway_payment_id.to_string());
                Ok(Some(order.clone()))
            }
            None => Ok(None),
        }
    }

    async fn order_stats(&self) -> Result<OrderStats, sqlx::Error> {
        let orders = self.orders.lock().unwrap();
        let paid: Vec<_> = orders
            .iter()
            .filter(|o| o.payment_status == PaymentStatus::Paid)
            .collect();
        Ok(OrderStats {
            total_orders: orders.len() as i64,
            paid_orders: paid.len() as i64,
            revenue: paid.iter().map(|o| o.total_amount).sum(),
        })
    }
}

#[derive(Default)]
pub struct MockMealPlanRepository {
    pub plans: Mutex<Vec<MealPlan>>,
}

impl MockMealPlanRepository {
    pub fn with_plan(plan: MealPlan) -> Self {
        Self {
            plans: Mutex::new(vec![plan]),
        }
    }
}

#[async_trait]
impl MealPlanRepository for MockMealPlanRepository {
    async fn find_active_by_id(&self, plan_id: Uuid) -> Result<Option<MealPlan>, sqlx::Error> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == plan_id && p.is_active)
            .cloned())
    }
}
