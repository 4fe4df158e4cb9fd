#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::api::client::DEFAULT_API_URL;
use crate::api::geocoding::{DEFAULT_NOMINATIM_URL, DEFAULT_PHOTON_URL};
use crate::core::hours::CLOSED_TODAY;
use crate::core::ConfigProvider;
use crate::utils::error::{CoffeeFilterError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// `$HOME/.config/coffee-filter`, if a home directory is known.
pub fn default_token_dir() -> Option<String> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    let dir: PathBuf = [home.into(), PathBuf::from(".config"), PathBuf::from("coffee-filter")]
        .iter()
        .collect();
    Some(dir.to_string_lossy().into_owned())
}

/// Fully resolved settings: built-in defaults, then the config file, then flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub token_dir: String,
    pub closed_label: String,
    pub nominatim_url: String,
    pub photon_url: String,
}

impl Settings {
    pub fn from_toml(file: &TomlConfig) -> Result<Self> {
        let token_dir = file
            .token_dir()
            .map(str::to_string)
            .or_else(default_token_dir)
            .ok_or_else(|| CoffeeFilterError::MissingConfigError {
                field: "auth.token_dir".to_string(),
            })?;

        Ok(Self {
            api_url: file.api_url().unwrap_or(DEFAULT_API_URL).to_string(),
            timeout_seconds: file.timeout_seconds().unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            token_dir,
            closed_label: file.closed_label().unwrap_or(CLOSED_TODAY).to_string(),
            nominatim_url: file.nominatim_url().unwrap_or(DEFAULT_NOMINATIM_URL).to_string(),
            photon_url: file.photon_url().unwrap_or(DEFAULT_PHOTON_URL).to_string(),
        })
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api_url)?;
        validate_positive_number("api.timeout_seconds", self.timeout_seconds, 1)?;
        validate_path("auth.token_dir", &self.token_dir)?;
        validate_non_empty_string("display.closed_label", &self.closed_label)?;
        validate_url("geocoding.nominatim_url", &self.nominatim_url)?;
        validate_url("geocoding.photon_url", &self.photon_url)
    }
}

impl ConfigProvider for Settings {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn token_dir(&self) -> &str {
        &self.token_dir
    }

    fn closed_label(&self) -> &str {
        &self.closed_label
    }
}
