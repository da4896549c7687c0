use std::env::VarError;

use crate::app_config::StorefrontConfig;
use crate::ConfigError;

/// Load storefront configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_config() -> Result<StorefrontConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load storefront configuration from environment variables already in the process.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_config_from_env() -> Result<StorefrontConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Default `tracing` filter directive for when `RUST_LOG` is unset.
///
/// Reads `STOREFRONT_LOG_LEVEL` only, so it never requires `STOREFRONT_BASE_URL`.
#[must_use]
pub fn load_log_level() -> String {
    dotenvy::dotenv().ok();
    log_level_from(|key| std::env::var(key))
}

fn log_level_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Result<String, VarError>,
{
    lookup("STOREFRONT_LOG_LEVEL")
        .ok()
        .map(|level| level.trim().to_string())
        .filter(|level| !level.is_empty())
        .unwrap_or_else(|| "info".to_string())
}

/// Parse and validate configuration through an injectable env-var lookup so
/// tests can use a plain `HashMap`.
fn build_config<F>(lookup: F) -> Result<StorefrontConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let base_url = require("STOREFRONT_BASE_URL")?;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(invalid(
            "STOREFRONT_BASE_URL",
            format!("expected an http(s) URL, got '{base_url}'"),
        ));
    }

    let shipping_timeout_secs = or_default("STOREFRONT_SHIPPING_TIMEOUT_SECS", "10")
        .parse::<u64>()
        .map_err(|e| invalid("STOREFRONT_SHIPPING_TIMEOUT_SECS", e.to_string()))?;
    if shipping_timeout_secs == 0 {
        return Err(invalid(
            "STOREFRONT_SHIPPING_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }

    let user_agent = or_default("STOREFRONT_USER_AGENT", "storefront/0.1 (checkout)");

    Ok(StorefrontConfig {
        base_url,
        shipping_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
