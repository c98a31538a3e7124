//! Configuration management for iotap.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
#[cfg(feature = "toml")]
use std::path::Path;

/// Environment variable overriding `proxy.listen`.
pub const ENV_LISTEN: &str = "IOTAP_LISTEN";
/// Environment variable overriding `proxy.upstream`.
pub const ENV_UPSTREAM: &str = "IOTAP_UPSTREAM";
/// Environment variable overriding `logging.level`.
pub const ENV_LOG: &str = "IOTAP_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub dump: DumpConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// How observed chunks are rendered in trace output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpFormat {
    #[default]
    Hex,
    Text,
}

impl fmt::Display for DumpFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpFormat::Hex => write!(f, "hex"),
            DumpFormat::Text => write!(f, "text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    pub format: DumpFormat,
    /// Bytes rendered per chunk; 0 renders everything.
    pub max_bytes: usize,
    /// Attach an observer to the read side.
    pub read: bool,
    /// Attach an observer to the write side.
    pub write: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            format: DumpFormat::Hex,
            max_bytes: 256,
            read: true,
            write: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub listen: String,
    pub upstream: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:7070".to_string(),
            upstream: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. Missing sections fall back to defaults.
    #[cfg(feature = "toml")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = toml::from_str(content)?;
        Ok(config)
    }

    /// Override addresses and log level from `IOTAP_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(listen) = lookup(ENV_LISTEN) {
            self.proxy.listen = listen;
        }
        if let Some(upstream) = lookup(ENV_UPSTREAM) {
            self.proxy.upstream = upstream;
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.proxy.listen.trim().is_empty() {
            return Err(CoreError::Invalid("proxy.listen is empty".to_string()));
        }
        if self.proxy.upstream.trim().is_empty() {
            return Err(CoreError::Invalid("proxy.upstream is empty".to_string()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(CoreError::Invalid("logging.level is empty".to_string()));
        }
        Ok(())
    }
}
