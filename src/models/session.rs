use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Server-side record of an issued access token.
///
/// A token authenticates only while its row exists and `expires_at` is in the
/// future; deleting the row revokes the token even though its signature stays
/// valid until the embedded expiry.
#[derive(Debug, FromRow, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: OffsetDateTime,
    pub created_ip: Option<String>,
    pub created_user_agent: Option<String>,
    pub created_at: OffsetDateTime,
}
