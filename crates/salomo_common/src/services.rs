// --- File: crates/salomo_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The payment processor is reached only through [`CheckoutProcessor`], so the
//! HTTP layer can run against a real processor or a test double.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// The three processor operations the checkout gateway relies on.
pub trait CheckoutProcessor: Send + Sync {
    /// Error type returned by processor operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The publishable (client-side) key. Never the secret key.
    fn publishable_key(&self) -> &str;

    /// Create a one-time-payment checkout session.
    fn create_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> BoxFuture<'_, CreatedCheckoutSession, Self::Error>;

    /// Retrieve a checkout session, expanding the given nested fields.
    ///
    /// The processor's JSON object is returned untouched.
    fn retrieve_session(
        &self,
        session_id: &str,
        expand: &[&str],
    ) -> BoxFuture<'_, serde_json::Value, Self::Error>;
}

/// A single priced line item of a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    /// ISO currency code, lower case (e.g. "jpy").
    pub currency: String,
    /// Amount in the currency's smallest unit.
    pub unit_amount: i64,
    pub product_name: String,
    pub description: String,
    pub quantity: u32,
}

/// Everything the processor needs to open a one-time-payment session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    pub line_item: CheckoutLineItem,
    /// Success redirect; may contain the processor's session-id placeholder.
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: BTreeMap<String, String>,
}

/// The parts of a freshly created session the caller needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCheckoutSession {
    pub id: String,
    pub url: String,
}
