use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error>;
    /// Create-or-fetch a user record for a guest checkout. The stored
    /// credential is an empty placeholder, so the account cannot log in.
    async fn upsert_guest(
        &self,
        email: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<User, sqlx::Error>;
    async fn touch_last_login(
        &self,
        user_id: Uuid,
        at: OffsetDateTime,
    ) -> Result<(), sqlx::Error>;
    async fn count_users(&self) -> Result<i64, sqlx::Error>;
}
