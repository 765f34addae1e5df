use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` is the binary's job; this function only
/// reads whatever is already in the process environment.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Thresholds are ratios; anything outside [0, 1] is a configuration
    // mistake, not a tuning choice.
    let parse_ratio = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{value} is outside [0, 1]"),
            });
        }
        Ok(value)
    };

    let embed_url = require("FAMSCOUT_EMBED_URL")?;

    let data_dir = PathBuf::from(or_default("FAMSCOUT_DATA_DIR", "./data"));
    let ledger_db_path = lookup("FAMSCOUT_LEDGER_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir.join("guid.db"));

    let embed_model = or_default("FAMSCOUT_EMBED_MODEL", "all-mpnet-base-v2");
    let embed_timeout_secs = parse_u64("FAMSCOUT_EMBED_TIMEOUT_SECS", "30")?;
    let embed_max_retries = parse_u32("FAMSCOUT_EMBED_MAX_RETRIES", "3")?;
    let embed_backoff_base_secs = parse_u64("FAMSCOUT_EMBED_BACKOFF_BASE_SECS", "2")?;

    let similarity_threshold = parse_ratio("FAMSCOUT_SIMILARITY_THRESHOLD", "0.85")?;
    let venue_title_threshold = parse_ratio("FAMSCOUT_VENUE_TITLE_THRESHOLD", "0.5")?;
    let relevance_threshold = parse_ratio("FAMSCOUT_RELEVANCE_THRESHOLD", "0.60")?;

    let log_level = or_default("FAMSCOUT_LOG_LEVEL", "info");

    Ok(AppConfig {
        data_dir,
        ledger_db_path,
        embed_url,
        embed_model,
        embed_timeout_secs,
        embed_max_retries,
        embed_backoff_base_secs,
        similarity_threshold,
        venue_title_threshold,
        relevance_threshold,
        log_level,
    })
}
