use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, SalomoError};

// Include the client module
pub mod client;

/// Extension trait for SalomoError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for SalomoError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({ "error": self.public_message() }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for SalomoError to make it easier to use in Axum handlers.
impl IntoResponse for SalomoError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a `Result<T, E>` into a JSON handler result using a custom error mapper.
pub fn map_json_error<T, E, F>(result: Result<T, E>, f: F) -> Result<Json<T>, SalomoError>
where
    T: serde::Serialize,
    F: FnOnce(E) -> SalomoError,
{
    result.map(Json).map_err(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::external_service_error;

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = external_service_error("Stripe API", "Invalid API Key provided").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Invalid API Key provided" }));
    }
}
