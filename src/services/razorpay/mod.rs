use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

mod live;
mod mock;

pub use live::RazorpayClient;
#[allow(unused_imports)]
pub use mock::MockGateway;

/// Remote order minted by the gateway. `amount` comes back in the smallest
/// currency unit, exactly as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("gateway rejected order creation: {status}")]
    Rejected { status: reqwest::StatusCode },
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mint a remote order id for `amount` in the smallest currency unit
    /// (paise for INR). Scaling is the caller's responsibility.
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError>;
}
