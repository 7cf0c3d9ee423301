use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a session row for a freshly issued token. Sessions are additive;
    /// a user may hold any number of concurrent sessions.
    async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: OffsetDateTime,
        ip: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<(), sqlx::Error>;

    /// True iff a row exists for this token and its expiry is in the future.
    /// Checked independently of the token signature; both must pass.
    async fn is_live(&self, token: &str) -> Result<bool, sqlx::Error>;

    /// Delete the session row. Idempotent; revoking an unknown token is fine.
    async fn revoke(&self, token: &str) -> Result<(), sqlx::Error>;

    /// Sweep rows past their expiry. Expired rows are already inert, so this
    /// is housekeeping only.
    async fn delete_expired(&self) -> Result<u64, sqlx::Error>;
}
