use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Uniform response envelope. Successes carry `message`, denials carry
/// `error`; clients key off `success` plus the status code.
#[derive(Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JsonResponse {
    pub fn success(msg: &str) -> impl IntoResponse {
        (
            StatusCode::OK,
            Json(JsonResponse {
                success: true,
                message: Some(msg.to_string()),
                error: None,
            }),
        )
    }

    fn error_with(status: StatusCode, msg: &str) -> (StatusCode, Json<JsonResponse>) {
        (
            status,
            Json(JsonResponse {
                success: false,
                message: None,
                error: Some(msg.to_string()),
            }),
        )
    }

    pub fn bad_request(msg: &str) -> impl IntoResponse {
        Self::error_with(StatusCode::BAD_REQUEST, msg)
    }

    pub fn unauthorized(msg: &str) -> impl IntoResponse {
        Self::error_with(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn forbidden(msg: &str) -> impl IntoResponse {
        Self::error_with(StatusCode::FORBIDDEN, msg)
    }

    pub fn not_found(msg: &str) -> impl IntoResponse {
        Self::error_with(StatusCode::NOT_FOUND, msg)
    }

    pub fn conflict(msg: &str) -> impl IntoResponse {
        Self::error_with(StatusCode::CONFLICT, msg)
    }

    pub fn server_error(msg: &str) -> impl IntoResponse {
        Self::error_with(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub fn too_many_requests(msg: &str) -> impl IntoResponse {
        Self::error_with(StatusCode::TOO_MANY_REQUESTS, msg)
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use serde_json::Value;

    use crate::responses::JsonResponse;

    #[tokio::test]
    async fn success_carries_message() {
        let resp = JsonResponse::success("ok").into_response();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "ok");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn denial_carries_error() {
        let resp = JsonResponse::forbidden("Admin access required").into_response();
        assert_eq!(resp.status(), axum::http::StatusCode::FORBIDDEN);

        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Admin access required");
        assert!(json.get("message").is_none());
    }
}
