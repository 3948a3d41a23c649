//! Stripe Checkout client
//!
//! Creates one-item card-payment sessions against the Checkout Sessions API
//! (`POST /v1/checkout/sessions`, form-encoded).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use stance_core::{
    CheckoutError, CheckoutProvider, CheckoutRequest, CheckoutSession, ProviderFailure,
};
use tracing::debug;

use crate::error::ClientError;
use crate::http::{
    build_client, decode, read_success, redacted, transport_failure, DEFAULT_TIMEOUT_SECS,
};

/// Production API base URL.
pub const STRIPE_BASE_URL: &str = "https://api.stripe.com";

pub const DEFAULT_REGULAR_PRICE: &str = "price_1RbCAOEQ22SY5ldZuUu9DOeO";
pub const DEFAULT_DISCOUNT_PRICE: &str = "price_1RbCAOEQ22SY5ldZvgRrFfex";
pub const DEFAULT_SUCCESS_URL: &str = "https://pinionate.com/success?paid=true";
pub const DEFAULT_CANCEL_URL: &str = "https://pinionate.com";

/// Stripe Checkout configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Base URL; `/v1/checkout/sessions` is appended
    pub base_url: String,
    /// Secret key (`STRIPE_SECRET_KEY`)
    pub secret_key: Option<String>,
    pub regular_price: String,
    pub discount_price: String,
    pub success_url: String,
    pub cancel_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for StripeConfig {
    fn default() -> Self {
        StripeConfig {
            base_url: STRIPE_BASE_URL.to_string(),
            secret_key: None,
            regular_price: DEFAULT_REGULAR_PRICE.to_string(),
            discount_price: DEFAULT_DISCOUNT_PRICE.to_string(),
            success_url: DEFAULT_SUCCESS_URL.to_string(),
            cancel_url: DEFAULT_CANCEL_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &redacted(&self.secret_key))
            .field("regular_price", &self.regular_price)
            .field("discount_price", &self.discount_price)
            .field("success_url", &self.success_url)
            .field("cancel_url", &self.cancel_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StripeConfig {
    /// Build from a key lookup (usually the process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = StripeConfig::default();
        StripeConfig {
            base_url: lookup("STRIPE_BASE_URL").unwrap_or(defaults.base_url),
            secret_key: lookup("STRIPE_SECRET_KEY"),
            regular_price: lookup("STRIPE_PRICE_REGULAR").unwrap_or(defaults.regular_price),
            discount_price: lookup("STRIPE_PRICE_DISCOUNT").unwrap_or(defaults.discount_price),
            success_url: lookup("STRIPE_SUCCESS_URL").unwrap_or(defaults.success_url),
            cancel_url: lookup("STRIPE_CANCEL_URL").unwrap_or(defaults.cancel_url),
            timeout: defaults.timeout,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_secret_key(mut self, secret_key: &str) -> Self {
        self.secret_key = Some(secret_key.to_string());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether the configured key is a live-mode secret key.
    pub fn is_live_key(&self) -> bool {
        self.secret_key
            .as_deref()
            .map(|key| key.starts_with("sk_live_"))
            .unwrap_or(false)
    }

    /// Price id for the request: discounted or regular.
    pub fn price_for(&self, request: CheckoutRequest) -> &str {
        if request.discount {
            &self.discount_price
        } else {
            &self.regular_price
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/checkout/sessions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
}

/// Stripe Checkout client
#[derive(Debug, Clone)]
pub struct StripeCheckoutClient {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripeCheckoutClient {
    pub fn new(config: StripeConfig) -> Result<Self, ClientError> {
        let http_client = build_client(config.timeout)?;
        Ok(StripeCheckoutClient {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

#[async_trait]
impl CheckoutProvider for StripeCheckoutClient {
    async fn create_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let secret_key = self
            .config
            .secret_key
            .as_deref()
            .ok_or(ProviderFailure::MissingCredential {
                name: "STRIPE_SECRET_KEY",
            })?;

        let price = self.config.price_for(request);
        debug!(price = %price, discount = request.discount, "creating checkout session");

        let form = [
            ("payment_method_types[0]", "card"),
            ("line_items[0][price]", price),
            ("line_items[0][quantity]", "1"),
            ("mode", "payment"),
            ("success_url", self.config.success_url.as_str()),
            ("cancel_url", self.config.cancel_url.as_str()),
        ];

        let response = self
            .http_client
            .post(self.config.endpoint())
            .bearer_auth(secret_key)
            .form(&form)
            .send()
            .await
            .map_err(transport_failure)?;

        let body = read_success(response).await?;
        let session: SessionResponse = decode(&body)?;

        Ok(CheckoutSession {
            session_id: session.id,
        })
    }
}
