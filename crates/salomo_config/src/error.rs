use thiserror::Error;

/// Errors raised while loading the application configuration.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// A configuration source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// A required Stripe credential is missing or empty
    #[error("Missing Stripe credential: {0}")]
    MissingCredential(&'static str),
}
