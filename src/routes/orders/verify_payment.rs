use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::responses::JsonResponse;
use crate::routes::auth::session::OptionalSession;
use crate::state::AppState;
use crate::utils::webhook_signature::verify_payment_signature;

#[derive(Deserialize, Serialize)]
pub struct VerifyPaymentPayload {
    pub razorpay_payment_id: String,
    pub razorpay_order_id: String,
    pub razorpay_signature: String,
}

/// Client-side confirmation callback. Same transition as the webhook, so
/// whichever arrives first wins and the other is a no-op; the webhook stays
/// authoritative if the client never calls back.
pub async fn verify_payment(
    State(app_state): State<AppState>,
    OptionalSession(principal): OptionalSession,
    Json(payload): Json<VerifyPaymentPayload>,
) -> Response {
    if !verify_payment_signature(
        &payload.razorpay_order_id,
        &payload.razorpay_payment_id,
        &payload.razorpay_signature,
        &app_state.config.razorpay.key_secret,
    ) {
        warn!(
            gateway_order_id = %payload.razorpay_order_id,
            "payment signature verification failed"
        );
        return JsonResponse::bad_request("Invalid payment signature").into_response();
    }

    match app_state
        .orders
        .find_by_gateway_order_id(&payload.razorpay_order_id)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => return JsonResponse::not_found("Order not found").into_response(),
        Err(e) => {
            error!(
                "DB error loading order {}: {:?}",
                payload.razorpay_order_id, e
            );
            return JsonResponse::server_error("Database error").into_response();
        }
    }

    match app_state
        .orders
        .mark_paid(&payload.razorpay_order_id, &payload.razorpay_payment_id)
        .await
    {
        Ok(Some(order)) => {
            info!(
                order_number = %order.order_number,
                verified_by = ?principal.as_ref().map(|p| p.user_id),
                "order confirmed via client verification"
            );
            if let Err(e) = app_state
                .mailer
                .send_order_confirmation(&order.customer_email, &order)
                .await
            {
                warn!("order confirmation email failed: {}", e);
            }
            Json(json!({ "success": true, "message": "Payment verified" })).into_response()
        }
        Ok(None) => {
            // Webhook beat us to it (or this is a client retry).
            Json(json!({ "success": true, "message": "Payment verified" })).into_response()
        }
        Err(e) => {
            error!(
                "DB error confirming order {}: {:?}",
                payload.razorpay_order_id, e
            );
            JsonResponse::server_error("Database error").into_response()
        }
    }
}
