use axum::{
    extract::{Json, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::{json, to_value};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{error, warn};

use crate::responses::JsonResponse;
use crate::routes::auth::claims::{Claims, TokenUse, ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL};
use crate::routes::auth::session::AUTH_COOKIE;
use crate::state::AppState;
use crate::utils::{
    ip::{client_ip, user_agent},
    jwt::create_jwt,
    password::verify_password,
};

#[derive(Deserialize, Serialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

pub async fn handle_login(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginPayload>,
) -> Response {
    let user = match app_state.users.find_user_by_email(&payload.email).await {
        Ok(Some(record)) => record,
        // Unknown email and wrong password are indistinguishable.
        Ok(None) => return JsonResponse::unauthorized("Invalid credentials").into_response(),
        Err(e) => {
            error!("DB error during login: {:?}", e);
            return JsonResponse::server_error("Database error").into_response();
        }
    };

    // Guest-checkout records carry an empty placeholder hash and cannot log in.
    if user.password_hash.trim().is_empty() {
        return JsonResponse::unauthorized("Invalid credentials").into_response();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => return JsonResponse::unauthorized("Invalid credentials").into_response(),
        Err(e) => {
            error!("Password verification error: {:?}", e);
            return JsonResponse::server_error("Internal error").into_response();
        }
    }

    if !user.is_active {
        return JsonResponse::forbidden("Account inactive or not found").into_response();
    }

    let keys = &app_state.jwt_keys;
    let issuer = &app_state.config.jwt_issuer;
    let audience = &app_state.config.jwt_audience;

    let access_claims = Claims::for_user(&user, TokenUse::Access, ACCESS_TOKEN_TTL);
    let expires_at = OffsetDateTime::now_utc() + ACCESS_TOKEN_TTL;
    let refresh_claims = Claims::for_user(&user, TokenUse::Refresh, REFRESH_TOKEN_TTL);

    let (access_token, refresh_token) = match (
        create_jwt(access_claims, keys, issuer, audience),
        create_jwt(refresh_claims, keys, issuer, audience),
    ) {
        (Ok(access), Ok(refresh)) => (access, refresh),
        (Err(e), _) | (_, Err(e)) => {
            error!("JWT error: {:?}", e);
            return JsonResponse::server_error("Token generation failed").into_response();
        }
    };

    // Only the access token becomes a session row; revoking it on logout is
    // what invalidates the cookie ahead of its embedded expiry.
    if let Err(e) = app_state
        .sessions
        .create(
            user.id,
            &access_token,
            expires_at,
            client_ip(&headers).as_deref(),
            user_agent(&headers).as_deref(),
        )
        .await
    {
        error!("Failed to persist session: {:?}", e);
        return JsonResponse::server_error("Database error").into_response();
    }

    if let Err(e) = app_state
        .users
        .touch_last_login(user.id, OffsetDateTime::now_utc())
        .await
    {
        warn!("Failed to update last_login_at for {}: {:?}", user.id, e);
    }

    let cookie = Cookie::build((AUTH_COOKIE, access_token.clone()))
        .http_only(true)
        .secure(app_state.config.auth_cookie_secure)
        .same_site(SameSite::None)
        .path("/")
        .max_age(TimeDuration::seconds(ACCESS_TOKEN_TTL.whole_seconds()))
        .build();

    let mut response_headers = HeaderMap::new();
    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            response_headers.insert(header::SET_COOKIE, value);
        }
        Err(e) => {
            error!("Failed to encode session cookie: {:?}", e);
            return JsonResponse::server_error("Internal error").into_response();
        }
    }

    // `User` skips the hash on serialization, so the body never carries it.
    let user_json = match to_value(&user) {
        Ok(value) => value,
        Err(e) => {
            error!("User serialization failed: {:?}", e);
            return JsonResponse::server_error("Internal error").into_response();
        }
    };

    (
        StatusCode::OK,
        response_headers,
        Json(json!({
            "success": true,
            "user": user_json,
            "accessToken": access_token,
            "refreshToken": refresh_token
        })),
    )
        .into_response()
}
