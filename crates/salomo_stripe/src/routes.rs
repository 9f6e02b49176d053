// --- File: crates/salomo_stripe/src/routes.rs ---

use crate::handlers::{
    create_checkout_session_handler, get_checkout_session_handler, get_config_handler,
    SharedProcessor, StripeState,
};
use axum::{
    routing::{get, post},
    Router,
};
use salomo_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes of the checkout gateway.
pub fn routes(config: Arc<AppConfig>, processor: SharedProcessor) -> Router {
    let stripe_state = Arc::new(StripeState { config, processor });

    Router::new()
        .route("/config", get(get_config_handler))
        .route(
            "/create-checkout-session",
            post(create_checkout_session_handler),
        )
        .route("/checkout-session/{id}", get(get_checkout_session_handler))
        .with_state(stripe_state)
}
