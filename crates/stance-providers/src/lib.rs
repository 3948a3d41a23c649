//! Stance-Providers: HTTP clients for the relay's upstreams
//!
//! Implements the `stance-core` provider traits over reqwest:
//!
//! - [`GoogleSearchClient`]: Google Custom Search (`SearchProvider`)
//! - [`OpenAiClient`]: OpenAI chat completions (`CompletionProvider`)
//! - [`StripeCheckoutClient`]: Stripe Checkout Sessions (`CheckoutProvider`)
//!
//! Every client applies a per-request timeout and never retries. A missing
//! credential fails the call without touching the network.

pub mod checkout;
pub mod completion;
pub mod error;
mod http;
pub mod search;

pub use checkout::{StripeCheckoutClient, StripeConfig};
pub use completion::{OpenAiClient, OpenAiConfig};
pub use error::ClientError;
pub use http::DEFAULT_TIMEOUT_SECS;
pub use search::{GoogleSearchClient, GoogleSearchConfig};
