use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::routes::auth::session::AuthSession;

/// Cheap liveness probe for clients: succeeds iff the full auth chain
/// (signature, session row, active account) passes.
pub async fn handle_verify(AuthSession(principal): AuthSession) -> Response {
    Json(json!({
        "success": true,
        "user": {
            "userId": principal.user_id,
            "email": principal.email,
            "role": principal.role,
        }
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use time::{Duration, OffsetDateTime};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::db::mock_db::{
        MockMealPlanRepository, MockOrderRepository, MockSessionRepository, MockUserRepository,
    };
    use crate::db::session_repository::SessionRepository;
    use crate::models::user::{User, UserRole};
    use crate::routes::auth::claims::{Claims, TokenUse, ACCESS_TOKEN_TTL};
    use crate::services::razorpay::MockGateway;
    use crate::services::smtp_mailer::MockMailer;
    use crate::state::test_support::{test_jwt_keys, test_state};
    use crate::utils::jwt::create_jwt;

    use super::handle_verify;

    #[tokio::test]
    async fn verify_returns_principal_for_live_session() {
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: "member@example.com".into(),
            phone: None,
            name: "Member".into(),
            password_hash: "unused".into(),
            role: UserRole::User,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        let token = create_jwt(
            Claims::for_user(&user, TokenUse::Access, ACCESS_TOKEN_TTL),
            &test_jwt_keys(),
            "test-issuer",
            "test-audience",
        )
        .unwrap();

        let sessions = Arc::new(MockSessionRepository::default());
        sessions
            .create(user.id, &token, now + Duration::hours(1), None, None)
            .await
            .unwrap();

        let state = test_state(
            Arc::new(MockUserRepository::with_user(user.clone())),
            sessions,
            Arc::new(MockOrderRepository::default()),
            Arc::new(MockMealPlanRepository::default()),
            Arc::new(MockMailer::default()),
            Arc::new(MockGateway::default()),
        );
        let app = Router::new()
            .route("/verify", get(handle_verify))
            .with_state(state);

        let res = app
            .oneshot(
                Request::get("/verify")
                    .header("Cookie", format!("auth_token={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["email"], "member@example.com");
        assert_eq!(json["user"]["role"], "user");
    }
}
