use crate::app_config::AppConfig;
use crate::region::{BoundingBox, Region};
use crate::ConfigError;

pub(crate) const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        parse_flag(&or_default(var, default))
            .ok_or_else(|| invalid(var, "expected true or false".to_string()))
    };

    let bind_addr = parse_addr("KIDSPOTS_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("KIDSPOTS_LOG_LEVEL", "info");

    let overpass_url = or_default("KIDSPOTS_OVERPASS_URL", DEFAULT_OVERPASS_URL);
    let overpass_timeout_secs = parse_u64("KIDSPOTS_OVERPASS_TIMEOUT_SECS", "120")?;
    if overpass_timeout_secs == 0 {
        return Err(invalid(
            "KIDSPOTS_OVERPASS_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("KIDSPOTS_USER_AGENT", "kidspots/0.1 (family-map)");

    let default_region = Region::default();
    let label = lookup("KIDSPOTS_REGION_LABEL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or(default_region.label);
    let bounds = match lookup("KIDSPOTS_BBOX") {
        Ok(raw) => raw
            .parse::<BoundingBox>()
            .map_err(|e| invalid("KIDSPOTS_BBOX", e.to_string()))?,
        Err(_) => default_region.bounds,
    };

    let refresh_on_startup = parse_bool("KIDSPOTS_REFRESH_ON_STARTUP", "false")?;
    let refresh_cron = lookup("KIDSPOTS_REFRESH_CRON")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let refresh_rate_limit = parse_usize("KIDSPOTS_REFRESH_RATE_LIMIT", "6")?;
    if refresh_rate_limit == 0 {
        return Err(invalid(
            "KIDSPOTS_REFRESH_RATE_LIMIT",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        bind_addr,
        log_level,
        overpass_url,
        overpass_timeout_secs,
        user_agent,
        region: Region { label, bounds },
        refresh_on_startup,
        refresh_cron,
        refresh_rate_limit,
    })
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
