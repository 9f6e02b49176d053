// --- File: crates/salomo_stripe/src/doc.rs ---
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    BookingSummary, CreateCheckoutSessionRequest, CreateCheckoutSessionResponse,
    PublicConfigResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_config_handler,
        crate::handlers::create_checkout_session_handler,
        crate::handlers::get_checkout_session_handler
    ),
    components(
        schemas(
            BookingSummary,
            CreateCheckoutSessionRequest,
            CreateCheckoutSessionResponse,
            PublicConfigResponse
        )
    ),
    tags(
        (name = "Stripe", description = "Stripe Checkout for the SALOMO match fee")
    )
)]
pub struct StripeApiDoc;
