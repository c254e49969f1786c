use crate::app_config::{AppConfig, Environment, GeocoderProvider, PageScheme};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset for the optional string settings.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let bind_addr = or_default("FYR_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("FYR_BIND_ADDR", e.to_string()))?;

    let request_timeout_secs = or_default("FYR_REQUEST_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("FYR_REQUEST_TIMEOUT_SECS", e.to_string()))?;

    let geocoder = or_default("FYR_GEOCODER", "google")
        .parse::<GeocoderProvider>()
        .map_err(|e| invalid("FYR_GEOCODER", e))?;

    let page_scheme = or_default("FYR_PAGE_SCHEME", "http")
        .parse::<PageScheme>()
        .map_err(|e| invalid("FYR_PAGE_SCHEME", e))?;

    Ok(AppConfig {
        env: parse_environment(&or_default("FYR_ENV", "development")),
        bind_addr,
        log_level: or_default("FYR_LOG_LEVEL", "info"),
        sunlight_api_key: optional("SUNLIGHT_API_KEY"),
        apis: or_default("FYR_APIS", crate::widget_config::DEFAULT_APIS),
        title: optional("FYR_TITLE"),
        text: optional("FYR_TEXT"),
        action: optional("FYR_ACTION"),
        geocoder,
        geocoder_api_key: optional("GEOCODER_API_KEY"),
        request_timeout_secs,
        user_agent: or_default("FYR_USER_AGENT", "fyr/0.1 (find-your-rep)"),
        page_scheme,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
