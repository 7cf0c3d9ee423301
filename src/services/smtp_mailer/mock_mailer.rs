use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::order::Order;

use super::{MailError, Mailer};

/// A mock mailer that records sent emails for testing purposes.
#[derive(Debug, Default)]
pub struct MockMailer {
    /// (recipient, order_number) per confirmation sent.
    pub sent_confirmations: Mutex<Vec<(String, String)>>,
    pub sent_generic: Mutex<Vec<(String, String, String)>>,
    pub fail_send: bool,
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_order_confirmation(&self, to: &str, order: &Order) -> Result<(), MailError> {
        if self.fail_send {
            return Err(MailError::Other("mock failure".into()));
        }
        self.sent_confirmations
            .lock()
            .unwrap()
            .push((to.to_string(), order.order_number.clone()));
        Ok(())
    }

    async fn send_email_generic(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), MailError> {
        if self.fail_send {
            return Err(MailError::Other("mock failure".into()));
        }
        self.sent_generic.lock().unwrap().push((
            to.to_string(),
            subject.to_string(),
            body.to_string(),
        ));
        Ok(())
    }
}
