// --- File: crates/salomo_common/src/lib.rs ---

pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod logging;   // Logging utilities
pub mod services;  // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{bad_request, external_service_error, forbidden, HttpStatusCode, SalomoError};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, map_json_error, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error};

pub use services::{
    BoxFuture, CheckoutLineItem, CheckoutProcessor, CheckoutSessionRequest, CreatedCheckoutSession,
};
