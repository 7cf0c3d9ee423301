use async_trait::async_trait;
use std::sync::Mutex;

use super::{GatewayError, GatewayOrder, PaymentGateway};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedGatewayOrder {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
}

/// Records order-creation calls and mints deterministic ids for tests.
#[derive(Default)]
pub struct MockGateway {
    pub created: Mutex<Vec<RecordedGatewayOrder>>,
    pub fail_create: bool,
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        if self.fail_create {
            return Err(GatewayError::Rejected {
                status: reqwest::StatusCode::BAD_GATEWAY,
            });
        }

        let mut created = self.created.lock().unwrap();
        created.push(RecordedGatewayOrder {
            amount,
            currency: currency.to_string(),
            receipt: receipt.to_string(),
        });

        Ok(GatewayOrder {
            id: format!("order_mock{}", created.len()),
            amount,
            currency: currency.to_string(),
        })
    }
}
