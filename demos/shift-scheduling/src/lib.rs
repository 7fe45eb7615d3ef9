//! Shift scheduling quickstart: an HTTP API and a one-shot CLI around
//! [`shiftforge::generate_schedule`].

pub mod api;

use std::path::Path;

use shiftforge_config::{AppConfig, ConfigError};

/// Config file read from the working directory when present.
pub const CONFIG_FILE: &str = "shiftforge.toml";

/// Loads [`CONFIG_FILE`], or the built-in defaults when it does not exist.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(CONFIG_FILE)
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        AppConfig::load(path)
    } else {
        Ok(AppConfig::default())
    }
}
