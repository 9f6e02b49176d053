// --- File: crates/salomo_stripe/src/logic.rs ---
use salomo_common::{CheckoutLineItem, CheckoutProcessor, CheckoutSessionRequest};
use salomo_config::ClientConfig;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use tracing::{error, info};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Stripe expects JPY amounts in whole yen (no minor unit).
pub const CURRENCY: &str = "jpy";
pub const UNIT_AMOUNT: i64 = 500;
pub const QUANTITY: u32 = 1;
pub const PRODUCT_NAME: &str = "SALOMO Match Fee";
pub const FALLBACK_DESCRIPTION: &str = "SALOMO match fee (details not provided)";
pub const DESCRIPTION_SEPARATOR: &str = " / ";
/// Nested objects expanded when a session is retrieved.
pub const SESSION_EXPAND: [&str; 2] = ["customer_details", "line_items"];

/// Budget as sent by the web client: a number of yen, or text taken verbatim.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Budget {
    Amount(Number),
    Text(String),
}

impl Budget {
    /// Zero and the empty string count as "no budget".
    fn is_blank(&self) -> bool {
        match self {
            Budget::Amount(amount) => amount.as_f64() == Some(0.0),
            Budget::Text(text) => text.is_empty(),
        }
    }

    /// Shown after the yen sign in the description.
    fn display(&self) -> String {
        match self {
            Budget::Amount(amount) => format_budget(amount),
            Budget::Text(text) => text.clone(),
        }
    }

    fn as_metadata(&self) -> String {
        match self {
            Budget::Amount(amount) => amount.to_string(),
            Budget::Text(text) => text.clone(),
        }
    }
}

/// Booking details collected by the web client. Every field is optional.
///
/// Text fields accept any JSON scalar (`"menu": 5` reads as `"5"`). Keys other
/// than the known ones are kept so the summary can be stored on the session
/// verbatim.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingSummary {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Budget in yen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    pub budget: Option<Budget>,
    #[serde(flatten)]
    #[cfg_attr(feature = "openapi", schema(ignore))]
    pub extra: BTreeMap<String, Value>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|value| metadata_value(&value)))
}

// Request FROM the web client
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateCheckoutSessionRequest {
    #[serde(default)]
    pub summary: Option<BookingSummary>,
}

// Response TO the web client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateCheckoutSessionResponse {
    pub url: String,
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PublicConfigResponse {
    #[serde(rename = "publishableKey")]
    pub publishable_key: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Formats a budget the way the web client displays it: whole numbers
/// without a fractional part.
fn format_budget(budget: &Number) -> String {
    if budget.is_i64() || budget.is_u64() {
        return budget.to_string();
    }
    match budget.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{}", f),
        None => budget.to_string(),
    }
}

/// Derives the line-item description from a booking summary.
///
/// Fragments appear in the order menu, area, when, budget and are joined
/// with `" / "`. Empty or absent fields produce no fragment. Without any
/// fragment the fallback description is used.
pub fn build_description(summary: Option<&BookingSummary>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(summary) = summary {
        if let Some(menu) = non_empty(&summary.menu) {
            parts.push(format!("Menu: {}", menu));
        }
        if let Some(area) = non_empty(&summary.area) {
            parts.push(format!("Area: {}", area));
        }

        let when = [non_empty(&summary.date), non_empty(&summary.time)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let when = when.trim();
        if !when.is_empty() {
            parts.push(format!("When: {}", when));
        }

        if let Some(budget) = summary.budget.as_ref().filter(|b| !b.is_blank()) {
            parts.push(format!("Budget: ¥{}", budget.display()));
        }
    }

    if parts.is_empty() {
        FALLBACK_DESCRIPTION.to_string()
    } else {
        parts.join(DESCRIPTION_SEPARATOR)
    }
}

/// Stripe metadata value for an arbitrary JSON value. `null` is skipped.
fn metadata_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// The raw summary as session metadata (key/value strings).
pub fn summary_metadata(summary: Option<&BookingSummary>) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    let Some(summary) = summary else {
        return metadata;
    };

    let text_fields = [
        ("menu", &summary.menu),
        ("area", &summary.area),
        ("date", &summary.date),
        ("time", &summary.time),
    ];
    for (key, value) in text_fields {
        if let Some(value) = value {
            metadata.insert(key.to_string(), value.clone());
        }
    }
    if let Some(budget) = &summary.budget {
        metadata.insert("budget".to_string(), budget.as_metadata());
    }
    for (key, value) in &summary.extra {
        if let Some(text) = metadata_value(value) {
            metadata.insert(key.clone(), text);
        }
    }
    metadata
}

/// Reads a create-session request body. A blank body counts as `{}`.
pub fn parse_create_request(body: &[u8]) -> Result<CreateCheckoutSessionRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateCheckoutSessionRequest::default());
    }
    serde_json::from_slice(body)
}

/// Builds the processor request for one match-fee checkout.
pub fn build_session_request(
    client: &ClientConfig,
    summary: Option<&BookingSummary>,
) -> CheckoutSessionRequest {
    CheckoutSessionRequest {
        line_item: CheckoutLineItem {
            currency: CURRENCY.to_string(),
            unit_amount: UNIT_AMOUNT,
            product_name: PRODUCT_NAME.to_string(),
            description: build_description(summary),
            quantity: QUANTITY,
        },
        success_url: client.success_url(),
        cancel_url: client.cancel_url(),
        metadata: summary_metadata(summary),
    }
}

/// Creates a Stripe Checkout Session for the given booking summary.
pub async fn create_checkout_session<P>(
    processor: &P,
    client: &ClientConfig,
    request_data: CreateCheckoutSessionRequest,
) -> Result<CreateCheckoutSessionResponse, P::Error>
where
    P: CheckoutProcessor + ?Sized,
{
    let session_request = build_session_request(client, request_data.summary.as_ref());
    info!(
        "[Stripe Logic] Creating Checkout Session: {}",
        session_request.line_item.description
    );

    match processor.create_session(session_request).await {
        Ok(session) => {
            info!("[Stripe Logic] Checkout Session created: {}", session.id);
            Ok(CreateCheckoutSessionResponse {
                url: session.url,
                id: session.id,
            })
        }
        Err(e) => {
            error!("[Stripe Logic] create session error: {}", e);
            Err(e)
        }
    }
}

/// Retrieves a Checkout Session with customer details and line items expanded.
pub async fn get_checkout_session<P>(processor: &P, session_id: &str) -> Result<Value, P::Error>
where
    P: CheckoutProcessor + ?Sized,
{
    info!(
        "[Stripe Logic] Retrieving Checkout Session details for ID: {}",
        session_id
    );

    processor
        .retrieve_session(session_id, &SESSION_EXPAND)
        .await
        .inspect_err(|e| {
            error!(
                "[Stripe Logic] Error retrieving checkout session {}: {}",
                session_id, e
            )
        })
}
