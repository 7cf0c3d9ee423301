use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;
use uuid::Uuid;

use crate::models::user::UserRole;
use crate::responses::JsonResponse;
use crate::routes::auth::claims::TokenUse;
use crate::state::AppState;
use crate::utils::jwt::decode_jwt;

pub const AUTH_COOKIE: &str = "auth_token";

/// Identity attached to a request once every auth check has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// Requires a signed token, a live session row, and an active account.
/// Signature validity alone is not enough: the session row is consulted on
/// every request, so revoking it (logout) locks the token out immediately.
pub struct AuthSession(pub Principal);

/// `AuthSession` plus the admin role.
pub struct AdminSession(pub Principal);

/// Same chain as `AuthSession` but never rejects; failures leave the
/// principal unset.
pub struct OptionalSession(pub Option<Principal>);

async fn authenticate(parts: &mut Parts, state: &AppState) -> Result<Principal, Response> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar
        .get(AUTH_COOKIE)
        .ok_or_else(|| JsonResponse::unauthorized("Authentication required").into_response())?;

    // Every decode failure looks the same to the client; expired vs forged is
    // not distinguishable from outside.
    let data = decode_jwt(
        token.value(),
        &state.jwt_keys,
        &state.config.jwt_issuer,
        &state.config.jwt_audience,
    )
    .map_err(|_| JsonResponse::unauthorized("Invalid or expired token").into_response())?;

    if data.claims.token_use != TokenUse::Access {
        return Err(JsonResponse::unauthorized("Invalid or expired token").into_response());
    }

    match state.sessions.is_live(token.value()).await {
        Ok(true) => {}
        Ok(false) => {
            return Err(JsonResponse::unauthorized("Session expired").into_response());
        }
        Err(e) => {
            error!("session lookup failed: {:?}", e);
            return Err(JsonResponse::server_error("Database error").into_response());
        }
    }

    match state.users.find_user_by_id(data.claims.sub).await {
        Ok(Some(user)) if user.is_active => Ok(Principal {
            user_id: user.id,
            email: user.email,
            role: user.role,
        }),
        Ok(_) => Err(JsonResponse::forbidden("Account inactive or not found").into_response()),
        Err(e) => {
            error!("user lookup failed: {:?}", e);
            Err(JsonResponse::server_error("Database error").into_response())
        }
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).await.map(AuthSession)
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = authenticate(parts, state).await?;
        match principal.role {
            UserRole::Admin => Ok(AdminSession(principal)),
            UserRole::User => {
                Err(JsonResponse::forbidden("Admin access required").into_response())
            }
        }
    }
}

impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalSession(authenticate(parts, state).await.ok()))
    }
}
