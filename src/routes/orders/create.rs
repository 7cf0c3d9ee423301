use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{error, info};
use uuid::Uuid;

use crate::db::order_repository::NewOrder;
use crate::responses::JsonResponse;
use crate::state::AppState;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub customer_email: String,
    pub customer_name: String,
    pub meal_plan_id: Uuid,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub delivery_time_slot: Option<String>,
    #[serde(default)]
    pub receipt: Option<String>,
}

/// Timestamp for readability, uuid suffix for uniqueness.
fn generate_order_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "ORD-{}-{}",
        OffsetDateTime::now_utc().unix_timestamp(),
        &suffix[..8]
    )
}

pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Response {
    let plan = match app_state
        .meal_plans
        .find_active_by_id(payload.meal_plan_id)
        .await
    {
        Ok(Some(plan)) => plan,
        Ok(None) => return JsonResponse::not_found("Meal plan not found").into_response(),
        Err(e) => {
            error!("DB error loading meal plan: {:?}", e);
            return JsonResponse::server_error("Database error").into_response();
        }
    };

    let order_number = generate_order_number();
    let receipt = payload.receipt.clone().unwrap_or_else(|| order_number.clone());

    // The gateway bills in the smallest currency unit.
    let amount = plan.discounted_price * 100;

    let gateway_order = match app_state.gateway.create_order(amount, "INR", &receipt).await {
        Ok(order) => order,
        Err(e) => {
            error!("Gateway order creation failed: {}", e);
            return JsonResponse::server_error("Payment gateway error").into_response();
        }
    };

    let user = match app_state
        .users
        .upsert_guest(
            &payload.customer_email,
            &payload.customer_name,
            payload.customer_phone.as_deref(),
        )
        .await
    {
        Ok(user) => user,
        Err(e) => {
            error!("Failed to upsert customer: {:?}", e);
            return JsonResponse::server_error("Database error").into_response();
        }
    };

    let order = match app_state
        .orders
        .insert_order(NewOrder {
            user_id: user.id,
            order_number,
            total_amount: gateway_order.amount,
            gateway_order_id: gateway_order.id.clone(),
            customer_email: payload.customer_email,
            customer_name: payload.customer_name,
            customer_phone: payload.customer_phone,
            meal_plan_id: plan.id,
            meal_plan_name: plan.name.clone(),
            delivery_address: payload.delivery_address,
            delivery_date: payload.delivery_date,
            delivery_time_slot: payload.delivery_time_slot,
        })
        .await
    {
        Ok(order) => order,
        Err(e) => {
            error!("Failed to persist order: {:?}", e);
            return JsonResponse::server_error("Database error").into_response();
        }
    };

    info!(
        order_number = %order.order_number,
        gateway_order_id = %order.gateway_order_id,
        "created pending order"
    );

    Json(json!({
        "success": true,
        "order_id": gateway_order.id,
        "amount": gateway_order.amount,
        "currency": gateway_order.currency,
        "key_id": app_state.config.razorpay.key_id,
    }))
    .into_response()
}
