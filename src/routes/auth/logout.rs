use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration as TimeDuration;
use tracing::warn;

use crate::responses::JsonResponse;
use crate::routes::auth::session::AUTH_COOKIE;
use crate::state::AppState;

/// Deletes the session row (immediate revocation; the signature stays valid
/// until its embedded expiry) and expires the cookie. Always succeeds, even
/// without a cookie.
pub async fn handle_logout(State(app_state): State<AppState>, headers: HeaderMap) -> Response {
    let jar = CookieJar::from_headers(&headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE) {
        if let Err(e) = app_state.sessions.revoke(cookie.value()).await {
            warn!("Failed to revoke session on logout: {:?}", e);
        }
    }

    let expired_cookie = Cookie::build((AUTH_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(app_state.config.auth_cookie_secure)
        .same_site(SameSite::None)
        .max_age(TimeDuration::seconds(0))
        .build();

    let mut response_headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&expired_cookie.to_string()) {
        response_headers.insert(SET_COOKIE, value);
    }

    (
        StatusCode::OK,
        response_headers,
        JsonResponse::success("Logged out"),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use serde_json::Value;
    use time::{Duration, OffsetDateTime};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::db::mock_db::{
        MockMealPlanRepository, MockOrderRepository, MockSessionRepository, MockUserRepository,
    };
    use crate::db::session_repository::SessionRepository;
    use crate::services::razorpay::MockGateway;
    use crate::services::smtp_mailer::MockMailer;
    use crate::state::test_support::test_state;

    use super::handle_logout;

    fn build_app(sessions: Arc<MockSessionRepository>) -> Router {
        let state = test_state(
            Arc::new(MockUserRepository::default()),
            sessions,
            Arc::new(MockOrderRepository::default()),
            Arc::new(MockMealPlanRepository::default()),
            Arc::new(MockMailer::default()),
            Arc::new(MockGateway::default()),
        );
        Router::new()
            .route("/logout", post(handle_logout))
            .with_state(state)
    }

    #[tokio::test]
    async fn logout_revokes_session_and_clears_cookie() {
        let sessions = Arc::new(MockSessionRepository::default());
        sessions
            .create(
                Uuid::new_v4(),
                "some-token",
                OffsetDateTime::now_utc() + Duration::hours(1),
                None,
                None,
            )
            .await
            .unwrap();
        let app = build_app(sessions.clone());

        let res = app
            .oneshot(
                Request::post("/logout")
                    .header("Cookie", "auth_token=some-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);

        let set_cookie_header = res.headers().get("set-cookie").unwrap().to_str().unwrap();
        assert!(set_cookie_header.contains("auth_token="));
        assert!(set_cookie_header.contains("Max-Age=0"));
        assert!(set_cookie_header.contains("HttpOnly"));

        let body_bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Logged out");

        // Session row gone: the still-signed token can no longer authenticate.
        assert!(sessions.sessions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn logout_without_cookie_still_succeeds() {
        let app = build_app(Arc::new(MockSessionRepository::default()));

        let res = app
            .oneshot(Request::post("/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }
}
