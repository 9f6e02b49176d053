//! Environment variable handling for the SALOMO checkout service.
//!
//! Every setting can be supplied through its canonical name
//! (`SALOMO__STRIPE__SECRET_KEY`) or through the conventional names the web
//! client's deployment already uses (`STRIPE_SECRET_KEY`, `CLIENT_URL`, ...).

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "SALOMO";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Configuration paths that may be set from the environment, with their
/// conventional variable names in lookup order.
pub const ENV_OVERRIDES: &[(&str, &[&str])] = &[
    ("server.host", &["HOST"]),
    ("server.port", &["PORT"]),
    ("client.base_url", &["CLIENT_URL"]),
    ("stripe.secret_key", &["STRIPE_SECRET_KEY"]),
    (
        "stripe.publishable_key",
        &["STRIPE_PUBLISHABLE_KEY", "REACT_APP_STRIPE_PUBLISHABLE_KEY"],
    ),
    ("stripe.api_base", &["STRIPE_API_BASE"]),
    ("stripe.api_version", &["STRIPE_API_VERSION"]),
    ("stripe.timeout_secs", &["STRIPE_TIMEOUT_SECS"]),
];

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "server.host")
///
/// # Returns
///
/// The environment variable name (e.g., "SALOMO__SERVER__HOST")
pub fn config_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", DEFAULT_PREFIX, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Resolve a configuration path against an environment lookup.
///
/// The canonical name wins over the conventional ones. Empty values are
/// treated as unset.
pub fn resolve_env_var<F>(lookup: &F, path: &str, conventional: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    std::iter::once(config_path_to_env_var(path))
        .chain(conventional.iter().map(|name| name.to_string()))
        .find_map(|name| lookup(&name).filter(|value| !value.trim().is_empty()))
}

/// Lookup backed by the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(config_path_to_env_var("server.host"), "SALOMO__SERVER__HOST");
        assert_eq!(
            config_path_to_env_var("stripe.secret_key"),
            "SALOMO__STRIPE__SECRET_KEY"
        );
    }

    #[test]
    fn test_canonical_name_wins() {
        let lookup = lookup_from(&[
            ("SALOMO__CLIENT__BASE_URL", "https://canonical.example"),
            ("CLIENT_URL", "https://conventional.example"),
        ]);
        assert_eq!(
            resolve_env_var(&lookup, "client.base_url", &["CLIENT_URL"]).as_deref(),
            Some("https://canonical.example")
        );
    }

    #[test]
    fn test_falls_back_in_order() {
        let lookup = lookup_from(&[("REACT_APP_STRIPE_PUBLISHABLE_KEY", "pk_test_react")]);
        assert_eq!(
            resolve_env_var(
                &lookup,
                "stripe.publishable_key",
                &["STRIPE_PUBLISHABLE_KEY", "REACT_APP_STRIPE_PUBLISHABLE_KEY"]
            )
            .as_deref(),
            Some("pk_test_react")
        );
    }

    #[test]
    fn test_empty_value_is_unset() {
        let lookup = lookup_from(&[("STRIPE_SECRET_KEY", "  ")]);
        assert_eq!(
            resolve_env_var(&lookup, "stripe.secret_key", &["STRIPE_SECRET_KEY"]),
            None
        );
    }
}
