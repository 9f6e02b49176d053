// --- File: crates/salomo_stripe/src/error.rs ---
use salomo_common::{external_service_error, HttpStatusCode, SalomoError};
use thiserror::Error;

/// Stripe-specific error types.
#[derive(Error, Debug)]
pub enum StripeError {
    /// Error occurred during a Stripe API request
    #[error("Stripe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Stripe API
    #[error("Stripe API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing Stripe API response
    #[error("Failed to parse Stripe API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Stripe created a session but returned no hosted checkout URL
    #[error("Stripe response missing checkout URL")]
    MissingSessionUrl,

    /// Invalid Stripe client configuration (e.g. malformed API base URL)
    #[error("Stripe configuration error: {0}")]
    ConfigError(String),
}

impl StripeError {
    /// The underlying message, without this crate's wrapping.
    ///
    /// For API errors this is Stripe's own `error.message`.
    pub fn message(&self) -> String {
        match self {
            StripeError::RequestError(e) => e.to_string(),
            StripeError::ApiError { message, .. } => message.clone(),
            StripeError::ParseError(e) => e.to_string(),
            StripeError::MissingSessionUrl => self.to_string(),
            StripeError::ConfigError(msg) => msg.clone(),
        }
    }
}

/// Convert StripeError to SalomoError
impl From<StripeError> for SalomoError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::ConfigError(msg) => SalomoError::ConfigError(msg),
            other => external_service_error("Stripe API", other.message()),
        }
    }
}

impl HttpStatusCode for StripeError {
    fn status_code(&self) -> u16 {
        // Every processor failure surfaces as a generic server error.
        500
    }
}
