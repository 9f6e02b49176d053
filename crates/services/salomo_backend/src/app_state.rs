// --- File: crates/services/salomo_backend/src/app_state.rs ---
use salomo_config::AppConfig;
use salomo_stripe::{SharedProcessor, StripeCheckoutService, StripeError};
use std::sync::Arc;

/// Application state shared by all routes.
///
/// Built once at startup; nothing in it changes while the server runs.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// The payment processor behind the checkout routes.
    pub processor: SharedProcessor,
}

impl AppState {
    /// State with an explicit processor (used by tests to inject a fake).
    pub fn new(config: Arc<AppConfig>, processor: SharedProcessor) -> Self {
        Self { config, processor }
    }

    /// State backed by the real Stripe API.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, StripeError> {
        let processor: SharedProcessor = Arc::new(StripeCheckoutService::new(&config.stripe)?);
        Ok(Self::new(config, processor))
    }
}
