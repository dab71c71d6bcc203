//! Configuration loading and representation.
//!
//! Everything comes from environment variables with sensible defaults, so the
//! server starts with no configuration at all.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use bengkel_inventory::NormalizationDefaults;
use bengkel_observability::LogFormat;

use crate::services::DEFAULT_INVALIDATION_TOPICS;

pub const ENV_BIND_ADDR: &str = "BENGKEL_BIND_ADDR";
pub const ENV_LOG_FORMAT: &str = "BENGKEL_LOG_FORMAT";
pub const ENV_DEFAULT_PRICE: &str = "BENGKEL_DEFAULT_PRICE";
pub const ENV_DEFAULT_STOCK: &str = "BENGKEL_DEFAULT_STOCK";
pub const ENV_INVALIDATE_TOPICS: &str = "BENGKEL_INVALIDATE_TOPICS";
pub const ENV_SEED_FILE: &str = "BENGKEL_SEED_FILE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub defaults: NormalizationDefaults,
    pub invalidation_topics: Vec<String>,
    /// JSON array of records loaded into the in-memory store at startup.
    pub seed_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::default(),
            defaults: NormalizationDefaults::default(),
            invalidation_topics: DEFAULT_INVALIDATION_TOPICS.iter().map(|t| t.to_string()).collect(),
            seed_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the process env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        cfg.bind_addr = parse(ENV_BIND_ADDR, &bind)?;

        if let Some(v) = get(ENV_LOG_FORMAT) {
            cfg.log_format = parse(ENV_LOG_FORMAT, &v)?;
        }

        if let Some(v) = get(ENV_DEFAULT_PRICE) {
            let price: Decimal = parse(ENV_DEFAULT_PRICE, &v)?;
            if price < Decimal::ZERO {
                return Err(ConfigError::invalid(ENV_DEFAULT_PRICE, &v, "must not be negative"));
            }
            cfg.defaults.price = price;
        }

        if let Some(v) = get(ENV_DEFAULT_STOCK) {
            cfg.defaults.stock = parse(ENV_DEFAULT_STOCK, &v)?;
        }

        if let Some(v) = get(ENV_INVALIDATE_TOPICS) {
            cfg.invalidation_topics = v
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }

        cfg.seed_file = get(ENV_SEED_FILE).map(PathBuf::from);

        Ok(cfg)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::invalid(key, value, e))
}
