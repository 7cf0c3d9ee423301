use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::models::user::{User, UserRole};

/// Access tokens are the ones tracked as server-side sessions.
pub const ACCESS_TOKEN_TTL: Duration = Duration::hours(24);
/// Refresh tokens are returned to the caller but not tracked server-side;
/// there is no refresh endpoint.
pub const REFRESH_TOKEN_TTL: Duration = Duration::days(7);

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    pub token_use: TokenUse,
    pub iat: usize,
    pub exp: usize, // expiration (as UNIX timestamp)
    pub iss: String,
    pub aud: String,
}

impl Claims {
    /// Stamp claims for `user` with `exp = now + ttl`. Issuer and audience
    /// are filled in at signing time.
    pub fn for_user(user: &User, token_use: TokenUse, ttl: Duration) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            token_use,
            iat: now as usize,
            exp: (now + ttl.whole_seconds()) as usize,
            iss: String::new(),
            aud: String::new(),
        }
    }
}
