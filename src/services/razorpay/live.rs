use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use super::{GatewayError, GatewayOrder, PaymentGateway};

const ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RazorpayClient {
    client: Arc<Client>,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(client: Arc<Client>, key_id: String, key_secret: String) -> Self {
        Self {
            client,
            key_id,
            key_secret,
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let body = json!({
            "amount": amount,
            "currency": currency,
            "receipt": receipt,
            "payment_capture": 1,
        });

        let response = self
            .client
            .post(ORDERS_URL)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Rejected {
                status: response.status(),
            });
        }

        Ok(response.json::<GatewayOrder>().await?)
    }
}
