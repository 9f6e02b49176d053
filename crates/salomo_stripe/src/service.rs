// --- File: crates/salomo_stripe/src/service.rs ---
//! Stripe implementation of [`CheckoutProcessor`] over the Stripe REST API.

use reqwest::{Client, StatusCode, Url};
use salomo_common::{
    create_client, BoxFuture, CheckoutProcessor, CheckoutSessionRequest, CreatedCheckoutSession,
};
use salomo_config::StripeConfig;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::StripeError;

// Response FROM Stripe API when creating a session
#[derive(Deserialize, Debug)]
struct StripeCheckoutSessionApiResponse {
    pub id: String,
    pub url: Option<String>,
}

/// Stripe checkout service holding a pooled HTTP client and the API credentials.
pub struct StripeCheckoutService {
    client: Client,
    api_base: Url,
    api_version: String,
    secret_key: String,
    publishable_key: String,
}

impl StripeCheckoutService {
    /// Create a new Stripe checkout service from the loaded configuration.
    pub fn new(config: &StripeConfig) -> Result<Self, StripeError> {
        let api_base = Url::parse(&config.api_base).map_err(|e| {
            StripeError::ConfigError(format!("invalid Stripe API base '{}': {}", config.api_base, e))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(StripeError::ConfigError(format!(
                "Stripe API base '{}' cannot be used as a base URL",
                config.api_base
            )));
        }

        Ok(Self {
            client: create_client(config.timeout_secs, false)?,
            api_base,
            api_version: config.api_version.clone(),
            secret_key: config.secret_key.clone(),
            publishable_key: config.publishable_key.clone(),
        })
    }

    /// `{api_base}/v1/checkout/sessions[/{id}]`, with the id as one encoded path segment.
    fn sessions_url(&self, session_id: Option<&str>) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v1", "checkout", "sessions"]);
            if let Some(id) = session_id {
                segments.push(id);
            }
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, StripeError> {
        let response = request
            .basic_auth(&self.secret_key, None::<&str>)
            .header("Stripe-Version", &self.api_version)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        debug!("[Stripe] API response status: {}", status);

        if status.is_success() {
            Ok(body_text)
        } else {
            Err(api_error(status, body_text))
        }
    }
}

/// Builds an `ApiError` from a non-2xx response, preferring Stripe's `error.message`.
fn api_error(status: StatusCode, body_text: String) -> StripeError {
    let error_message = match serde_json::from_str::<Value>(&body_text) {
        Ok(json_body) => json_body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(String::from)
            .unwrap_or(body_text),
        Err(_) => body_text,
    };
    StripeError::ApiError {
        status_code: status.as_u16(),
        message: error_message,
    }
}

/// Form body for `POST /v1/checkout/sessions`.
fn session_form(request: &CheckoutSessionRequest) -> Vec<(String, String)> {
    let item = &request.line_item;
    let mut form_body: Vec<(String, String)> = vec![
        ("mode".to_string(), "payment".to_string()),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
        (
            "line_items[0][price_data][currency]".to_string(),
            item.currency.clone(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            item.unit_amount.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            item.product_name.clone(),
        ),
        (
            "line_items[0][price_data][product_data][description]".to_string(),
            item.description.clone(),
        ),
        (
            "line_items[0][quantity]".to_string(),
            item.quantity.to_string(),
        ),
    ];
    for (key, value) in &request.metadata {
        form_body.push((format!("metadata[{}]", key), value.clone()));
    }
    form_body
}

impl CheckoutProcessor for StripeCheckoutService {
    type Error = StripeError;

    fn publishable_key(&self) -> &str {
        &self.publishable_key
    }

    fn create_session(
        &self,
        request: CheckoutSessionRequest,
    ) -> BoxFuture<'_, CreatedCheckoutSession, Self::Error> {
        Box::pin(async move {
            let api_url = self.sessions_url(None);
            info!("[Stripe] Sending request to Stripe API: {}", api_url);

            let body_text = self
                .send(self.client.post(api_url).form(&session_form(&request)))
                .await?;

            let session: StripeCheckoutSessionApiResponse = serde_json::from_str(&body_text)?;
            match session.url {
                Some(url) => Ok(CreatedCheckoutSession {
                    id: session.id,
                    url,
                }),
                None => Err(StripeError::MissingSessionUrl),
            }
        })
    }

    fn retrieve_session(
        &self,
        session_id: &str,
        expand: &[&str],
    ) -> BoxFuture<'_, Value, Self::Error> {
        let api_url = self.sessions_url(Some(session_id));
        let expand_query: Vec<(&'static str, String)> = expand
            .iter()
            .map(|field| ("expand[]", field.to_string()))
            .collect();

        Box::pin(async move {
            let body_text = self
                .send(self.client.get(api_url).query(&expand_query))
                .await?;
            Ok(serde_json::from_str(&body_text)?)
        })
    }
}
