//! Card payment processor integration.

use async_trait::async_trait;
use thiserror::Error;

pub mod stripe;

pub use stripe::{StripeConfig, StripeProcessor};

/// Currency every studio charge is made in.
pub const CURRENCY: &str = "usd";

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{provider} rejected the request: {message}")]
    Provider { provider: String, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Creates a card-only payment intent for `amount` minor units.
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> PaymentResult<PaymentIntent>;

    fn provider_name(&self) -> &'static str;
}

/// Converts a major-unit price into minor units (cents).
pub fn to_minor_units(price: f64) -> Option<i64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }
    let amount = (price * 100.0).round();
    if amount < 1.0 || amount > i64::MAX as f64 {
        return None;
    }
    Some(amount as i64)
}
