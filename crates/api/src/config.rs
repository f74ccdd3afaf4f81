use std::str::FromStr;

use axum::http::HeaderValue;
use catalog_core::ordering::SourceOrder;

/// Startup configuration that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got `{value}`")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("CORS_ORIGINS entry `{0}` is not a valid origin")]
    InvalidOrigin(String),
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development; `DATABASE_URL`
/// is read separately by the binary since tests never need it.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on closing the pool after the listener stops (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// Connection pool size (default: `10`).
    pub db_max_connections: u32,
    /// Which end of the source `priority` scale plays first (default: `asc`).
    pub source_order: SourceOrder,
    /// Mount `/v1/debug/counts` (default: `true`).
    pub debug_routes: bool,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 10,
            db_max_connections: 10,
            source_order: SourceOrder::Ascending,
            debug_routes: true,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`                    |
    /// | `DB_MAX_CONNECTIONS`    | `10`                    |
    /// | `SOURCE_PRIORITY_ORDER` | `asc`                   |
    /// | `DEBUG_ROUTES`          | `true`                  |
    /// | `LOG_FORMAT`            | `text`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or(defaults.host);

        let cors_origins = match var("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };
        for origin in &cors_origins {
            if origin.parse::<HeaderValue>().is_err() || !origin.contains("://") {
                return Err(ConfigError::InvalidOrigin(origin.clone()));
            }
        }

        Ok(Self {
            host,
            port: parse_var(var("PORT"), "PORT", "a port number", defaults.port)?,
            cors_origins,
            request_timeout_secs: parse_positive(
                var("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                "a positive whole number of seconds",
                defaults.request_timeout_secs,
            )?,
            shutdown_timeout_secs: parse_var(
                var("SHUTDOWN_TIMEOUT_SECS"),
                "SHUTDOWN_TIMEOUT_SECS",
                "a whole number of seconds",
                defaults.shutdown_timeout_secs,
            )?,
            db_max_connections: parse_positive(
                var("DB_MAX_CONNECTIONS"),
                "DB_MAX_CONNECTIONS",
                "a positive integer",
                defaults.db_max_connections,
            )?,
            source_order: parse_var(
                var("SOURCE_PRIORITY_ORDER"),
                "SOURCE_PRIORITY_ORDER",
                "`asc` or `desc`",
                defaults.source_order,
            )?,
            debug_routes: match var("DEBUG_ROUTES") {
                Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                    var: "DEBUG_ROUTES",
                    expected: "a boolean",
                    value: raw,
                })?,
                None => defaults.debug_routes,
            },
            log_format: parse_var(
                var("LOG_FORMAT"),
                "LOG_FORMAT",
                "`text` or `json`",
                defaults.log_format,
            )?,
        })
    }
}

fn parse_var<T: FromStr>(
    raw: Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}

/// Like [`parse_var`], rejecting zero.
fn parse_positive<T: FromStr + Default + PartialEq>(
    raw: Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    let value = parse_var(raw.clone(), var, expected, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            var,
            expected,
            value: raw.unwrap_or_default(),
        });
    }
    Ok(value)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
