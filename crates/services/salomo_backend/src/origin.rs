// --- File: crates/services/salomo_backend/src/origin.rs ---
//! Caller origin restriction.
//!
//! Requests carrying an `Origin` header are rejected unless the origin is the
//! configured client base URL or one of the local development origins.
//! Requests without an `Origin` header are not browser requests and pass.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{
    header::{CONTENT_TYPE, ORIGIN},
    HeaderValue, Method,
};
use salomo_common::forbidden;
use salomo_config::ClientConfig;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<HeaderValue>,
}

impl AllowedOrigins {
    pub fn from_config(client: &ClientConfig) -> Self {
        let origins: Vec<HeaderValue> = client
            .allowed_origins()
            .into_iter()
            .filter(|origin| origin != "*")
            .filter_map(|origin| match HeaderValue::from_str(&origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid origin in configuration: {:?}", origin);
                    None
                }
            })
            .collect();

        info!("CORS: Restricting to {:?}", origins);
        Self { origins }
    }

    pub fn is_allowed(&self, origin: &HeaderValue) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
    }

    /// CORS headers for the allowed origins (preflight included).
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.origins.clone()))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE])
    }
}

/// Middleware rejecting requests from origins outside the allow list with 403.
pub async fn require_allowed_origin(
    State(allowed): State<Arc<AllowedOrigins>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        if !allowed.is_allowed(origin) {
            warn!(origin = ?origin, path = %request.uri().path(), "Request rejected: origin not allowed");
            return forbidden("Origin not allowed").into_response();
        }
    }
    next.run(request).await
}
