use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    // Secrets
    pub api_key: Option<String>,
    pub telegram_token: String,
    pub chat_id: String,

    // Fetch
    pub fetch_timeout: Duration,
    pub fetch_attempts: u32,

    // Mode
    pub announce_start: bool,
    pub log_level: String,

    // Endpoints
    pub binance_url: String,
    pub telegram_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let fetch_timeout_secs: u64 = parse_or(&var, "FETCH_TIMEOUT_SECS", 10)?;
        if fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "FETCH_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "timeout must be positive".to_string(),
            });
        }

        let fetch_attempts: u32 = parse_or(&var, "FETCH_ATTEMPTS", 1)?;
        if fetch_attempts == 0 {
            return Err(ConfigError::Invalid {
                name: "FETCH_ATTEMPTS",
                value: "0".to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }

        Ok(Config {
            // Secrets
            api_key: var("BINANCE_API_KEY"),
            telegram_token: var("TELEGRAM_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?,
            chat_id: var("TELEGRAM_CHAT_ID").ok_or(ConfigError::Missing("TELEGRAM_CHAT_ID"))?,

            // Fetch
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            fetch_attempts,

            // Mode
            announce_start: parse_or(&var, "ANNOUNCE_START", false)?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            // Endpoints
            binance_url: var("BINANCE_BASE_URL")
                .unwrap_or_else(|| "https://api.binance.com".to_string()),
            telegram_url: var("TELEGRAM_API_URL")
                .unwrap_or_else(|| "https://api.telegram.org".to_string()),
        })
    }

    /// Log filter from `LOG_LEVEL`; accepts a bare level or full directives
    /// such as `alpha_watch=debug,reqwest=warn`. Falls back to `info`.
    pub fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw,
            reason: e.to_string(),
        }),
    }
}
