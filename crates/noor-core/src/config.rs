use crate::app_config::{AppConfig, DEFAULT_OVERPASS_TIMEOUT_SECS, DEFAULT_OVERPASS_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
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

    let database_url = lookup("DATABASE_URL")
        .ok()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    let bind_addr = parse_addr("NOOR_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("NOOR_LOG_LEVEL", "info");
    let places_path = PathBuf::from(or_default("NOOR_PLACES_PATH", "./config/places.yaml"));

    let db_max_connections = parse_u32("NOOR_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("NOOR_DB_MIN_CONNECTIONS", "0")?;
    let db_acquire_timeout_secs = parse_u64("NOOR_DB_ACQUIRE_TIMEOUT_SECS", "5")?;

    let overpass_url = or_default("NOOR_OVERPASS_URL", DEFAULT_OVERPASS_URL);
    let overpass_timeout_secs = parse_u64(
        "NOOR_OVERPASS_TIMEOUT_SECS",
        &DEFAULT_OVERPASS_TIMEOUT_SECS.to_string(),
    )?;
    if overpass_timeout_secs == 0 {
        return Err(invalid(
            "NOOR_OVERPASS_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let overpass_user_agent = or_default("NOOR_OVERPASS_USER_AGENT", "noor/0.1 (halal-places)");
    let overpass_max_elements = parse_u32("NOOR_OVERPASS_MAX_ELEMENTS", "50")?;

    let rate_limit_per_minute = parse_usize("NOOR_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        database_url,
        bind_addr,
        log_level,
        places_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        overpass_url,
        overpass_timeout_secs,
        overpass_user_agent,
        overpass_max_elements,
        rate_limit_per_minute,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
