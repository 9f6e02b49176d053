// --- File: crates/salomo_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::fmt;

/// Local development origins that are always allowed next to `client.base_url`.
pub const DEFAULT_DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5002",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

// --- Client (web front-end) Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    /// Public base URL of the web client, used for redirects and as an allowed origin.
    pub base_url: String,
    pub dev_origins: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://projapani.vercel.app".to_string(),
            dev_origins: DEFAULT_DEV_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    /// Every origin allowed to call the service: the base URL first, then the dev origins.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![self.base_url.trim_end_matches('/').to_string()];
        for origin in &self.dev_origins {
            if !origins.contains(origin) {
                origins.push(origin.clone());
            }
        }
        origins
    }

    /// `<base>/success?session_id={CHECKOUT_SESSION_ID}`; Stripe fills in the placeholder.
    pub fn success_url(&self) -> String {
        format!(
            "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
            self.base_url.trim_end_matches('/')
        )
    }

    pub fn cancel_url(&self) -> String {
        format!("{}/cancel", self.base_url.trim_end_matches('/'))
    }
}

/// Stripe API timeout, matching the one Stripe's own SDKs use.
pub const DEFAULT_STRIPE_TIMEOUT_SECS: u64 = 80;

// --- Stripe Config ---
// The secret key is never serialized and is redacted from Debug output.
#[derive(Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StripeConfig {
    #[serde(skip_serializing)]
    pub secret_key: String,
    pub publishable_key: String,
    pub api_base: String,
    pub api_version: String,
    pub timeout_secs: u64,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            publishable_key: String::new(),
            api_base: "https://api.stripe.com".to_string(),
            api_version: "2024-06-20".to_string(),
            timeout_secs: DEFAULT_STRIPE_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"<redacted>")
            .field("publishable_key", &self.publishable_key)
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub stripe: StripeConfig,
}
