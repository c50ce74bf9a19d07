//! Payment intent boundary
//!
//! The order flow only ever needs one thing from a card processor: an
//! intent for an exact minor-unit amount, answered with a client
//! secret. [`PaymentProcessor`] is that seam; [`StripeProcessor`]
//! talks to the real API and [`MockProcessor`] records amounts for
//! tests. Intents are created before any order is persisted, so a
//! processor failure leaves no half-created order behind.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    /// The processor answered but refused the request
    #[error("Payment rejected: {0}")]
    Rejected(String),

    #[error("Payment service unreachable: {0}")]
    Network(#[from] reqwest::Error),
}

/// What the client needs to confirm a payment
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create an intent for `amount` minor units of `currency`
    async fn create_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent, PaymentError>;
}

/// Stripe-backed processor using the form-encoded REST API
pub struct StripeProcessor {
    http: reqwest::Client,
    api_url: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

impl StripeProcessor {
    pub fn new(api_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            secret_key: secret_key.into(),
        }
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    async fn create_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .http
            .post(format!("{}/v1/payment_intents", self.api_url))
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount.to_string()),
                ("currency", currency.to_string()),
                ("automatic_payment_methods[enabled]", "true".to_string()),
            ])
            .send()
            .await?;

        if response.status().is_success() {
            let intent: PaymentIntent = response.json().await?;
            tracing::info!(intent = %intent.id, amount, currency, "Payment intent created");
            Ok(intent)
        } else {
            let status = response.status();
            let message = match response.json::<StripeErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("HTTP {}", status),
            };
            tracing::warn!(%status, %message, "Payment intent refused");
            Err(PaymentError::Rejected(message))
        }
    }
}

/// Test double that records every requested amount
#[derive(Default)]
pub struct MockProcessor {
    amounts: Mutex<Vec<i64>>,
    fail_with: Mutex<Option<String>>,
}

impl MockProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with this rejection message
    pub fn reject_with(&self, message: impl Into<String>) {
        if let Ok(mut slot) = self.fail_with.lock() {
            *slot = Some(message.into());
        }
    }

    /// Amounts of every intent created so far, in call order
    pub fn created_amounts(&self) -> Vec<i64> {
        self.amounts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PaymentProcessor for MockProcessor {
    async fn create_intent(&self, amount: i64, _currency: &str) -> Result<PaymentIntent, PaymentError> {
        if let Ok(slot) = self.fail_with.lock() {
            if let Some(message) = slot.as_ref() {
                return Err(PaymentError::Rejected(message.clone()));
            }
        }
        let n = {
            let mut amounts = self.amounts.lock().unwrap();
            amounts.push(amount);
            amounts.len()
        };
        Ok(PaymentIntent {
            id: format!("pi_mock_{n}"),
            client_secret: format!("pi_mock_{n}_secret_test"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_amounts() {
        let mock = MockProcessor::new();
        let intent = mock.create_intent(15000, "mxn").await.unwrap();
        assert_eq!(intent.client_secret, "pi_mock_1_secret_test");
        mock.create_intent(5550, "mxn").await.unwrap();
        assert_eq!(mock.created_amounts(), vec![15000, 5550]);
    }

    #[tokio::test]
    async fn test_mock_rejection_creates_nothing() {
        let mock = MockProcessor::new();
        mock.reject_with("card declined");
        let err = mock.create_intent(100, "mxn").await.unwrap_err();
        assert!(matches!(err, PaymentError::Rejected(m) if m == "card declined"));
        assert!(mock.created_amounts().is_empty());
    }
}
