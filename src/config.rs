use crate::error::SettleError;
use crate::money::RoundingMode;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Config {
    pub log_level: String,
    pub rounding: RoundingMode,
    pub input_path: Option<PathBuf>,
    pub strict: bool,
    pub pretty: bool,
}

impl Config {
    /// Reads the environment (and `.env`). Unset or blank variables fall back to
    /// defaults; values that are set but unparsable are rejected.
    pub fn from_env() -> Result<Self, SettleError> {
        dotenv().ok();

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rounding: parse_rounding(env::var("SETTLE_ROUNDING").ok())?,
            input_path: env::var("SETTLE_INPUT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            strict: parse_flag_var("SETTLE_STRICT", env::var("SETTLE_STRICT").ok(), false)?,
            pretty: parse_flag_var("SETTLE_PRETTY", env::var("SETTLE_PRETTY").ok(), true)?,
        })
    }
}

fn parse_rounding(value: Option<String>) -> Result<RoundingMode, SettleError> {
    match value.filter(|v| !v.trim().is_empty()) {
        None => Ok(RoundingMode::default()),
        Some(v) => v
            .parse()
            .map_err(|err| SettleError::Config(format!("SETTLE_ROUNDING: {}", err))),
    }
}

fn parse_flag_var(name: &str, value: Option<String>, default: bool) -> Result<bool, SettleError> {
    match value.filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(v) => parse_flag(&v)
            .ok_or_else(|| SettleError::Config(format!("{}: expected a boolean, got `{}`", name, v))),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Global static accessible everywhere; holds the error when the environment is bad
pub static CONFIG: Lazy<Result<Config, SettleError>> = Lazy::new(Config::from_env);
