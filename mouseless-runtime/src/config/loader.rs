//! Configuration loading

use mouseless_core::traits::{Storage, StorageError};
use thiserror::Error;
use tracing::{info, warn};

use super::DeviceConfig;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    Storage(StorageError),

    #[error("configuration is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Parse configuration text
pub fn parse_config(text: &str) -> Result<DeviceConfig, ConfigError> {
    Ok(toml::from_str(text)?)
}

/// Load configuration from storage
///
/// A missing file yields the defaults; an unreadable or invalid one is an
/// error.
pub fn load_config<S: Storage + ?Sized>(
    storage: &S,
    path: &str,
) -> Result<DeviceConfig, ConfigError> {
    let bytes = match storage.read(path) {
        Ok(bytes) => bytes,
        Err(StorageError::NotFound) => {
            info!(path, "no configuration file, using defaults");
            return Ok(DeviceConfig::default());
        }
        Err(err) => return Err(ConfigError::Storage(err)),
    };
    let text = std::str::from_utf8(&bytes)?;
    let config = parse_config(text).inspect_err(|err| warn!(path, %err, "configuration rejected"))?;
    info!(path, start_page = %config.start_page, "configuration loaded");
    Ok(config)
}
