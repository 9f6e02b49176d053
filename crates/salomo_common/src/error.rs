use std::fmt;
use thiserror::Error;

/// The base error type shared by the SALOMO crates.
///
/// Feature crates convert their own errors into this one via `From`, and the
/// HTTP layer turns it into a `{ "error": <message> }` response.
#[derive(Error, Debug)]
pub enum SalomoError {
    /// The request body could not be read as the expected JSON
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The caller is not allowed to use this endpoint (e.g. origin not allowed)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Error occurred during an external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },
}

impl SalomoError {
    /// The message exposed to HTTP callers.
    ///
    /// External service errors carry the service's own message verbatim.
    pub fn public_message(&self) -> String {
        match self {
            SalomoError::ExternalServiceError { message, .. } => message.clone(),
            SalomoError::Forbidden(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SalomoError {
    fn status_code(&self) -> u16 {
        match self {
            SalomoError::BadRequest(_) => 400,
            SalomoError::Forbidden(_) => 403,
            // Processor failures are reported as a plain server error.
            SalomoError::ConfigError(_) | SalomoError::ExternalServiceError { .. } => 500,
        }
    }
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> SalomoError {
    SalomoError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn bad_request<T: fmt::Display>(message: T) -> SalomoError {
    SalomoError::BadRequest(message.to_string())
}

pub fn forbidden<T: fmt::Display>(message: T) -> SalomoError {
    SalomoError::Forbidden(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_service_message_is_verbatim() {
        let err = external_service_error("Stripe API", "No such checkout.session: cs_x");
        assert_eq!(err.public_message(), "No such checkout.session: cs_x");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_forbidden_status() {
        let err = forbidden("Origin not allowed");
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.public_message(), "Origin not allowed");
    }

    #[test]
    fn test_bad_request_status() {
        let err = bad_request("expected value at line 1 column 1");
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.public_message(),
            "Invalid request body: expected value at line 1 column 1"
        );
    }
}
