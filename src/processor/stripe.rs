use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use super::{PaymentError, PaymentIntent, PaymentProcessor, PaymentResult};

const PROVIDER: &str = "stripe";

#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,
    /// API base URL, overridable for tests.
    pub api_base_url: String,
}

impl StripeConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: crate::config::DEFAULT_PAYMENT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }
}

pub struct StripeProcessor {
    config: StripeConfig,
    client: Client,
}

impl StripeProcessor {
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PaymentError::Network(e.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    #[instrument(skip(self))]
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> PaymentResult<PaymentIntent> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);
        let form = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];
        debug!(test_mode = self.config.is_test_mode(), "creating payment intent");

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .form(&form)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            error!(%status, "payment intent rejected");
            let message = serde_json::from_str::<StripeErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));
            return Err(PaymentError::Provider {
                provider: PROVIDER.to_string(),
                message,
            });
        }

        let intent: StripePaymentIntent = serde_json::from_str(&body)
            .map_err(|e| PaymentError::Decode(format!("payment intent: {e}")))?;
        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::Decode("payment intent has no client_secret".into()))?;

        info!(intent_id = %intent.id, "payment intent created");
        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    #[serde(default)]
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: String,
}
