// --- File: crates/salomo_stripe/src/handlers.rs ---
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Json,
};
use salomo_common::{bad_request, map_json_error, CheckoutProcessor, SalomoError};
use salomo_config::AppConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::error::StripeError;
use crate::logic::{
    create_checkout_session, get_checkout_session, parse_create_request,
    CreateCheckoutSessionRequest, CreateCheckoutSessionResponse, PublicConfigResponse,
};

/// The processor as seen by the handlers; tests substitute a fake.
pub type SharedProcessor = Arc<dyn CheckoutProcessor<Error = StripeError>>;

// --- State for Stripe Handlers ---
#[derive(Clone)]
pub struct StripeState {
    pub config: Arc<AppConfig>,
    pub processor: SharedProcessor,
}

/// Axum handler exposing the publishable key to the web client.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/config",
    responses(
        (status = 200, description = "Stripe publishable key", body = PublicConfigResponse)
    ),
    tag = "Stripe"
))]
pub async fn get_config_handler(State(state): State<Arc<StripeState>>) -> Json<PublicConfigResponse> {
    Json(PublicConfigResponse {
        publishable_key: state.processor.publishable_key().to_string(),
    })
}

// `application/json` or any `+json` media type; parameters are ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| {
            let essence = essence.trim().to_ascii_lowercase();
            essence == "application/json" || essence.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Axum handler to create a Stripe Checkout Session.
///
/// A body that is empty or not declared as JSON is treated like `{}`. A JSON
/// body that cannot be read is answered with 400 `{ "error": ... }`.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/create-checkout-session",
    request_body = CreateCheckoutSessionRequest,
    responses(
        (status = 200, description = "Stripe Checkout Session created", body = CreateCheckoutSessionResponse),
        (status = 400, description = "Unreadable JSON body"),
        (status = 500, description = "Stripe API error")
    ),
    tag = "Stripe"
))]
pub async fn create_checkout_session_handler(
    State(state): State<Arc<StripeState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CreateCheckoutSessionResponse>, SalomoError> {
    let request = if is_json_content_type(&headers) {
        parse_create_request(&body).map_err(|e| {
            warn!("[Stripe Handler] Rejecting unreadable request body: {}", e);
            bad_request(e)
        })?
    } else {
        CreateCheckoutSessionRequest::default()
    };
    let result =
        create_checkout_session(state.processor.as_ref(), &state.config.client, request).await;
    map_json_error(result, SalomoError::from)
}

/// Axum handler returning a Checkout Session with customer details and line items.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/checkout-session/{id}",
    params(("id" = String, Path, description = "The ID of the Stripe checkout session")),
    responses(
        (status = 200, description = "Stripe Checkout Session object", body = Object),
        (status = 500, description = "Stripe API error")
    ),
    tag = "Stripe"
))]
pub async fn get_checkout_session_handler(
    State(state): State<Arc<StripeState>>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, SalomoError> {
    let result = get_checkout_session(state.processor.as_ref(), &session_id).await;
    map_json_error(result, SalomoError::from)
}
