use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

use crate::infrastructure::gemini;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}={value:?}: {reason}")]
    Invalid { name: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub slack_webhook_url: Option<String>,
    pub outbound_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = match get("HOST") {
            Some(v) => v.parse().map_err(|e: std::net::AddrParseError| invalid("HOST", v, e))?,
            None => IpAddr::from([127, 0, 0, 1]),
        };
        let port = match get("PORT") {
            Some(v) => v.parse().map_err(|e: std::num::ParseIntError| invalid("PORT", v, e))?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match get("OUTBOUND_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(0) => return Err(invalid("OUTBOUND_TIMEOUT_SECS", v, "must be positive")),
                Ok(n) => n,
                Err(e) => return Err(invalid("OUTBOUND_TIMEOUT_SECS", v, e)),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host,
            port,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            gemini_api_base: get("GEMINI_API_BASE").unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string()),
            slack_webhook_url: get("SLACK_WEBHOOK_URL"),
            outbound_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn addr(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }
}

fn invalid(name: &'static str, value: String, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid { name, value, reason: reason.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.addr(), "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert!(cfg.gemini_api_key.is_none());
        assert!(cfg.slack_webhook_url.is_none());
        assert_eq!(cfg.gemini_model, gemini::DEFAULT_MODEL);
        assert_eq!(cfg.outbound_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn blank_credentials_count_as_missing() {
        let cfg = config(&[("GEMINI_API_KEY", "  "), ("SLACK_WEBHOOK_URL", "https://hooks.example/x")]).unwrap();
        assert!(cfg.gemini_api_key.is_none());
        assert_eq!(cfg.slack_webhook_url.as_deref(), Some("https://hooks.example/x"));
    }

    #[test]
    fn invalid_numbers_are_errors() {
        assert!(config(&[("PORT", "http")]).is_err());
        assert!(config(&[("OUTBOUND_TIMEOUT_SECS", "0")]).is_err());
        let err = config(&[("HOST", "not-an-ip")]).unwrap_err();
        assert!(err.to_string().contains("HOST"));
    }
}
