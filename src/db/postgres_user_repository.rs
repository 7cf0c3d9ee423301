use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::user::User;

use super::user_repository::UserRepository;

const USER_COLUMNS: &str = "id, email, phone, name, password_hash, role, is_active, last_login_at, created_at, updated_at";

pub struct PostgresUserRepository {
    pub pool: PgPool,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn upsert_guest(
        &self,
        email: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        // Empty password hash: the guest record attributes orders to an email
        // but cannot authenticate.
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, phone, name, password_hash, role, is_active)
            VALUES ($1, $2, $3, '', 'user'::user_role, true)
            ON CONFLICT (email) DO UPDATE
                SET name = EXCLUDED.name,
                    phone = COALESCE(EXCLUDED.phone, users.phone),
                    updated_at = now()
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(phone)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    async fn touch_last_login(
        &self,
        user_id: Uuid,
        at: OffsetDateTime,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = $2, updated_at = now() WHERE id = $1")
            .bind(user_id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }
}
