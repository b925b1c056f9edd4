//! Service configuration from environment variables.
//!
//! | variable          | default                       |
//! |-------------------|-------------------------------|
//! | `APP_HOST`        | `0.0.0.0`                     |
//! | `APP_PORT`        | `3978`                        |
//! | `SSO_AUDIENCE`    | unset (audience not checked)  |
//! | `SSO_LEEWAY_SECS` | `60`                          |
//! | `LOG_FILTER`      | `info,teams_todo=debug`       |
//!
//! A `.env` file in the working directory is loaded first, if present.

use std::env;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3978;
pub const DEFAULT_SSO_LEEWAY_SECS: u64 = 60;
pub const DEFAULT_LOG_FILTER: &str = "info,teams_todo=debug";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_host: String,
    pub app_port: u16,
    /// Expected `aud` claim of incoming SSO tokens.
    pub sso_audience: Option<String>,
    /// Clock skew tolerated on token expiry.
    pub sso_leeway_secs: u64,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_host: DEFAULT_HOST.to_string(),
            app_port: DEFAULT_PORT,
            sso_audience: None,
            sso_leeway_secs: DEFAULT_SSO_LEEWAY_SECS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let app_port = match non_blank("APP_PORT") {
            Some(raw) => parse_number("APP_PORT", &raw)?,
            None => defaults.app_port,
        };
        let sso_leeway_secs = match non_blank("SSO_LEEWAY_SECS") {
            Some(raw) => parse_number("SSO_LEEWAY_SECS", &raw)?,
            None => defaults.sso_leeway_secs,
        };

        Ok(Self {
            app_host: non_blank("APP_HOST").unwrap_or(defaults.app_host),
            app_port,
            sso_audience: non_blank("SSO_AUDIENCE"),
            sso_leeway_secs,
            log_filter: non_blank("LOG_FILTER").unwrap_or(defaults.log_filter),
        })
    }

    /// `host:port` for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}
