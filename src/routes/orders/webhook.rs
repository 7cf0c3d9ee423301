use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::responses::JsonResponse;
use crate::state::AppState;
use crate::utils::webhook_signature::verify_webhook_signature;

// Small helper: nested json lookup
fn jget<'a>(val: &'a serde_json::Value, path: &[&str]) -> Option<&'a serde_json::Value> {
    let mut cur = val;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

fn extract_str<'a>(val: &'a serde_json::Value, path: &[&str]) -> Option<&'a str> {
    jget(val, path)?.as_str()
}

fn extract_order_id(event: &serde_json::Value) -> Option<&str> {
    extract_str(event, &["razorpay_order_id"])
        .or_else(|| extract_str(event, &["payload", "payment", "entity", "order_id"]))
}

fn extract_payment_id(event: &serde_json::Value) -> Option<&str> {
    extract_str(event, &["razorpay_payment_id"])
        .or_else(|| extract_str(event, &["payload", "payment", "entity", "id"]))
}

/// Authoritative confirmation path. Non-2xx responses make the gateway
/// redeliver, which is safe because `mark_paid` flips at most once.
pub async fn webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    let sig = match headers
        .get("x-razorpay-signature")
        .and_then(|h| h.to_str().ok())
    {
        Some(s) => s,
        None => return JsonResponse::bad_request("Missing signature header").into_response(),
    };

    // Verify over the raw bytes as received; re-serializing the parsed JSON
    // would not be byte-identical.
    if !verify_webhook_signature(&body, sig, &app_state.config.razorpay.webhook_secret) {
        warn!("webhook signature verification failed");
        return JsonResponse::bad_request("Invalid webhook signature").into_response();
    }

    let event: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => return JsonResponse::bad_request("Malformed payload").into_response(),
    };

    let (order_id, payment_id) = match (extract_order_id(&event), extract_payment_id(&event)) {
        (Some(order_id), Some(payment_id)) => (order_id, payment_id),
        _ => {
            warn!("webhook payload missing order or payment id");
            return JsonResponse::bad_request("Malformed payload").into_response();
        }
    };

    match app_state.orders.find_by_gateway_order_id(order_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return JsonResponse::not_found("Order not found").into_response(),
        Err(e) => {
            error!("DB error loading order {}: {:?}", order_id, e);
            return JsonResponse::server_error("Database error").into_response();
        }
    }

    match app_state.orders.mark_paid(order_id, payment_id).await {
        Ok(Some(order)) => {
            info!(
                order_number = %order.order_number,
                gateway_order_id = %order.gateway_order_id,
                "order confirmed via webhook"
            );
            // One-way side effect; a failed send never unwinds the payment.
            if let Err(e) = app_state
                .mailer
                .send_order_confirmation(&order.customer_email, &order)
                .await
            {
                warn!("order confirmation email failed: {}", e);
            }
            Json(json!({ "success": true })).into_response()
        }
        Ok(None) => {
            // Duplicate delivery; the transition already happened.
            info!(gateway_order_id = %order_id, "webhook for already-paid order acknowledged");
            Json(json!({ "success": true })).into_response()
        }
        Err(e) => {
            error!("DB error confirming order {}: {:?}", order_id, e);
            JsonResponse::server_error("Database error").into_response()
        }
    }
}
