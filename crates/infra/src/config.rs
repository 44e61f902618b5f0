//! Configuration loading and representation.
//!
//! Everything comes from environment variables; unset keys fall back to the
//! defaults below, malformed values are rejected.

use std::net::SocketAddr;

use thiserror::Error;

use stockflow_observability::LogFormat;
use stockflow_products::DEFAULT_ALERT_LIMIT;

use crate::store::ListOrder;

pub const BIND_ADDR_VAR: &str = "STOCKFLOW_BIND_ADDR";
pub const ALERT_LIMIT_VAR: &str = "STOCKFLOW_ALERT_LIMIT";
pub const DEFAULT_ORDER_VAR: &str = "STOCKFLOW_DEFAULT_ORDER";
pub const LOG_FORMAT_VAR: &str = "STOCKFLOW_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Alerts returned when a request does not pass its own limit.
    pub alert_limit: usize,
    /// Ordering used by product listings without an explicit `order`.
    pub default_order: ListOrder,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            alert_limit: DEFAULT_ALERT_LIMIT,
            default_order: ListOrder::default(),
            log_format: LogFormat::Json,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid(BIND_ADDR_VAR, &bind_raw, e.to_string()))?;

        let alert_limit = match lookup(ALERT_LIMIT_VAR) {
            None => DEFAULT_ALERT_LIMIT,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                Ok(_) => return Err(ConfigError::invalid(ALERT_LIMIT_VAR, &raw, "must be at least 1")),
                Err(e) => return Err(ConfigError::invalid(ALERT_LIMIT_VAR, &raw, e.to_string())),
            },
        };

        let default_order = match lookup(DEFAULT_ORDER_VAR) {
            None => ListOrder::default(),
            Some(raw) => raw
                .parse()
                .map_err(|e: stockflow_core::DomainError| {
                    ConfigError::invalid(DEFAULT_ORDER_VAR, &raw, e.to_string())
                })?,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            None => LogFormat::Json,
            Some(raw) => raw
                .parse()
                .map_err(|reason: String| ConfigError::invalid(LOG_FORMAT_VAR, &raw, reason))?,
        };

        Ok(Self {
            bind_addr,
            alert_limit,
            default_order,
            log_format,
        })
    }
}
