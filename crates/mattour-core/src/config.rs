use crate::app_config::{AppConfig, GOOGLE_API_KEY_VAR, KAKAO_API_KEY_VAR};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let google_api_key = optional(GOOGLE_API_KEY_VAR);
    let kakao_api_key = optional(KAKAO_API_KEY_VAR);
    let kakao_js_key = optional("KAKAO_JS_KEY");

    let log_level = or_default("MATTOUR_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("MATTOUR_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("MATTOUR_USER_AGENT", "mattour/0.1 (tourism-recommendation)");
    let max_retries = parse_u32("MATTOUR_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("MATTOUR_RETRY_BACKOFF_BASE_MS", "500")?;
    let nearby_pause_ms = parse_u64("MATTOUR_NEARBY_PAUSE_MS", "1000")?;
    let min_rating_filter = parse_bool(
        "MATTOUR_MIN_RATING_FILTER",
        &or_default("MATTOUR_MIN_RATING_FILTER", "true"),
    )?;
    let match_radius_meters = parse_u32("MATTOUR_MATCH_RADIUS_METERS", "300")?;
    let early_accept_meters = parse_meters(
        "MATTOUR_EARLY_ACCEPT_METERS",
        &or_default("MATTOUR_EARLY_ACCEPT_METERS", "100"),
    )?;
    let min_attraction_reviews = parse_u32("MATTOUR_MIN_ATTRACTION_REVIEWS", "50")?;
    let max_restaurants = parse_usize("MATTOUR_MAX_RESTAURANTS", "15")?;

    Ok(AppConfig {
        google_api_key,
        kakao_api_key,
        kakao_js_key,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        nearby_pause_ms,
        min_rating_filter,
        match_radius_meters,
        early_accept_meters,
        min_attraction_reviews,
        max_restaurants,
    })
}

/// Parse a boolean toggle. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// Parse a non-negative, finite distance in meters.
fn parse_meters(var: &str, raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a non-negative distance, got {value}"),
        });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
