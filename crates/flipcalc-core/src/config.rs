use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::fees::FeeSchedule;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if the marketplace credentials are missing or any
/// optional value fails to parse.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Blank credentials are as useless as absent ones.
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Rates must sit in [0, 1); the flat fee is an amount and only needs to be non-negative.
    let parse_decimal =
        |var: &str, default: Decimal, below: Option<Decimal>| -> Result<Decimal, ConfigError> {
            let Ok(raw) = lookup(var) else {
                return Ok(default);
            };
            let value = Decimal::from_str(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
            let out_of_range =
                value < Decimal::ZERO || below.is_some_and(|upper| value >= upper);
            if out_of_range {
                return Err(ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: format!("{value} is outside the accepted range"),
                });
            }
            Ok(value)
        };

    let ebay_client_id = require("EBAY_CLIENT_ID")?;
    let ebay_client_secret = require("EBAY_CLIENT_SECRET")?;

    let env = parse_environment(&or_default("FLIPCALC_ENV", "development"));
    let log_level = or_default("FLIPCALC_LOG_LEVEL", "info");
    let api_base_url = or_default("FLIPCALC_API_BASE_URL", "https://api.ebay.com");
    let request_timeout_secs = parse_u64("FLIPCALC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("FLIPCALC_USER_AGENT", "flipcalc/0.1 (resale-research)");
    let saved_searches_path = PathBuf::from(or_default(
        "FLIPCALC_SAVED_SEARCHES_PATH",
        "./flipcalc-saved.yaml",
    ));
    let export_dir = PathBuf::from(or_default("FLIPCALC_EXPORT_DIR", "."));

    let defaults = FeeSchedule::default();
    let fees = FeeSchedule {
        default_rate: parse_decimal(
            "FLIPCALC_FEE_DEFAULT_RATE",
            defaults.default_rate,
            Some(Decimal::ONE),
        )?,
        preferred_rate: parse_decimal(
            "FLIPCALC_FEE_PREFERRED_RATE",
            defaults.preferred_rate,
            Some(Decimal::ONE),
        )?,
        flat_fee: parse_decimal("FLIPCALC_FEE_FLAT", defaults.flat_fee, None)?,
        sales_tax_rate: parse_decimal(
            "FLIPCALC_SALES_TAX_RATE",
            defaults.sales_tax_rate,
            Some(Decimal::ONE),
        )?,
    };

    Ok(AppConfig {
        env,
        log_level,
        ebay_client_id,
        ebay_client_secret,
        api_base_url,
        request_timeout_secs,
        user_agent,
        saved_searches_path,
        export_dir,
        fees,
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
