use config::{Config, File};
use once_cell::sync::OnceCell;
use tracing::{debug, info};

pub mod env_vars;
pub mod error;
pub mod models;

pub use error::ConfigLoadError;
pub use models::*;

use env_vars::{process_env, resolve_env_var, ENV_OVERRIDES};

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the `.env` file once per process.
///
/// The path defaults to `.env` and can be overridden with `DOTENV_OVERRIDE`.
/// A missing file is not an error. Returns the path that was tried.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        if dotenv::from_filename(&dotenv_path).is_ok() {
            debug!("Loaded environment from {}", dotenv_path);
        }
    });

    dotenv_path
}

/// Loads the configuration from defaults, config files and the process environment.
pub fn load_config() -> Result<AppConfig, ConfigLoadError> {
    ensure_dotenv_loaded();
    load_config_with(process_env)
}

/// Loads the configuration using `lookup` in place of the process environment.
///
/// Layers, lowest priority first: built-in defaults, `<CONFIG_DIR>/default.*`,
/// `<CONFIG_DIR>/<RUN_ENV>.*`, environment variables.
pub fn load_config_with<F>(lookup: F) -> Result<AppConfig, ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let config_dir = lookup("CONFIG_DIR").unwrap_or_else(|| "config".to_string());
    let run_env = lookup("RUN_ENV").unwrap_or_else(|| "debug".to_string());

    let mut builder = Config::builder()
        .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
        .add_source(File::with_name(&format!("{config_dir}/{run_env}")).required(false));

    for (path, conventional) in ENV_OVERRIDES {
        builder = builder.set_override_option(*path, resolve_env_var(&lookup, path, conventional))?;
    }

    let config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&config)?;

    info!(
        "Configuration loaded (run_env: {}, port: {}, client: {})",
        run_env, config.server.port, config.client.base_url
    );
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigLoadError> {
    if config.stripe.secret_key.trim().is_empty() {
        return Err(ConfigLoadError::MissingCredential("STRIPE_SECRET_KEY"));
    }
    if config.stripe.publishable_key.trim().is_empty() {
        return Err(ConfigLoadError::MissingCredential(
            "STRIPE_PUBLISHABLE_KEY (or REACT_APP_STRIPE_PUBLISHABLE_KEY)",
        ));
    }
    Ok(())
}
