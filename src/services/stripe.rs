//! Stripe payment provider client.
//!
//! Implements the PaymentIntents API: the intent is created server-side and
//! the returned client secret is handed to the frontend for confirmation.

use crate::config::StripeConfig;
use anyhow::{anyhow, Result};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;

/// Stripe client for interacting with the Stripe API.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    config: StripeConfig,
}

/// Response from Stripe payment intent creation (subset of fields used).
#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    /// Stripe payment intent ID.
    pub id: String,
    /// Secret handed to the frontend to confirm the payment.
    pub client_secret: String,
    /// Amount in smallest currency unit.
    pub amount: u64,
    /// Currency code.
    pub currency: String,
    /// Intent status (e.g., "requires_payment_method").
    pub status: String,
}

/// Stripe API error response.
#[derive(Debug, Deserialize)]
pub struct StripeError {
    pub error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl StripeClient {
    /// Create a new Stripe client.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Check if Stripe is configured (secret key is set).
    pub fn is_configured(&self) -> bool {
        !self.config.secret_key.expose_secret().is_empty()
    }

    /// Create a payment intent in Stripe.
    ///
    /// # Arguments
    /// * `amount` - Amount in smallest currency unit (cents for USD)
    /// * `currency` - Currency code (e.g., "usd")
    pub async fn create_payment_intent(
        &self,
        amount: u64,
        currency: &str,
    ) -> Result<PaymentIntent> {
        if !self.is_configured() {
            return Err(anyhow!("Stripe credentials not configured"));
        }

        let url = format!("{}/payment_intents", self.config.api_base_url);

        // Stripe takes form-encoded request bodies
        let params = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.secret_key.expose_secret())
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, "Stripe create_payment_intent response");

        if status.is_success() {
            let intent: PaymentIntent = serde_json::from_str(&body)?;
            tracing::info!(
                intent_id = %intent.id,
                amount = intent.amount,
                currency = %intent.currency,
                "Stripe payment intent created"
            );
            Ok(intent)
        } else {
            let error: StripeError = serde_json::from_str(&body).unwrap_or_else(|_| StripeError {
                error: StripeErrorDetail {
                    error_type: "api_error".to_string(),
                    code: None,
                    message: Some(body.clone()),
                },
            });
            let message = error
                .error
                .message
                .unwrap_or_else(|| error.error.error_type.clone());
            tracing::error!(
                status = %status,
                error_type = %error.error.error_type,
                "Stripe payment intent creation failed: {}",
                message
            );
            Err(anyhow!("{}", message))
        }
    }
}
