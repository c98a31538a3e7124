//! Core functionality shared across the iotap workspace.
//!
//! This crate provides configuration, error and logging plumbing used by
//! the stream taps and the services built on top of them.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, DumpConfig, DumpFormat, LoggingConfig, ProxyConfig};
pub use error::{CoreError, Result};
