//! Device configuration
//!
//! Read from a TOML file on the page storage. Every field is optional and
//! falls back to the device defaults.

pub mod loader;

pub use loader::{load_config, parse_config, ConfigError};

use mouseless_core::config::{InputConfig, RendererConfig};
use serde::Deserialize;

/// Default configuration file on the page storage
pub const CONFIG_PATH: &str = "/mouseless.toml";

/// Top-level device configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// First page loaded at boot
    pub start_page: String,
    /// Render tick period (ms)
    pub tick_interval_ms: u64,
    pub renderer: RendererConfig,
    pub input: InputConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            start_page: String::from("/index.3ml"),
            tick_interval_ms: 33,
            renderer: RendererConfig::default(),
            input: InputConfig::default(),
        }
    }
}
