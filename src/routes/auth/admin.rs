use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::responses::JsonResponse;
use crate::routes::auth::session::AdminSession;
use crate::state::AppState;

/// Admin-only aggregate view: who is asking plus store-wide counts.
pub async fn admin_profile(
    State(app_state): State<AppState>,
    AdminSession(principal): AdminSession,
) -> Response {
    let total_users = match app_state.users.count_users().await {
        Ok(count) => count,
        Err(e) => {
            error!("failed to count users: {:?}", e);
            return JsonResponse::server_error("Database error").into_response();
        }
    };

    let stats = match app_state.orders.order_stats().await {
        Ok(stats) => stats,
        Err(e) => {
            error!("failed to load order stats: {:?}", e);
            return JsonResponse::server_error("Database error").into_response();
        }
    };

    Json(json!({
        "success": true,
        "profile": {
            "userId": principal.user_id,
            "email": principal.email,
            "role": principal.role,
        },
        "stats": {
            "totalUsers": total_users,
            "totalOrders": stats.total_orders,
            "paidOrders": stats.paid_orders,
            "revenue": stats.revenue,
        }
    }))
    .into_response()
}
