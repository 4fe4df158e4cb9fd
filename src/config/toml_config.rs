use crate::utils::error::{CoffeeFilterError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiConfig>,
    pub auth: Option<AuthConfig>,
    pub display: Option<DisplayConfig>,
    pub geocoding: Option<GeocodingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub token_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub closed_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub nominatim_url: Option<String>,
    pub photon_url: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CoffeeFilterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api.as_ref()?.base_url.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.api.as_ref()?.timeout_seconds
    }

    pub fn token_dir(&self) -> Option<&str> {
        self.auth.as_ref()?.token_dir.as_deref()
    }

    pub fn closed_label(&self) -> Option<&str> {
        self.display.as_ref()?.closed_label.as_deref()
    }

    pub fn nominatim_url(&self) -> Option<&str> {
        self.geocoding.as_ref()?.nominatim_url.as_deref()
    }

    pub fn photon_url(&self) -> Option<&str> {
        self.geocoding.as_ref()?.photon_url.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = self.api_url() {
            validate_url("api.base_url", url)?;
        }
        if let Some(timeout) = self.timeout_seconds() {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }
        if let Some(dir) = self.token_dir() {
            validate_path("auth.token_dir", dir)?;
        }
        if let Some(url) = self.nominatim_url() {
            validate_url("geocoding.nominatim_url", url)?;
        }
        if let Some(url) = self.photon_url() {
            validate_url("geocoding.photon_url", url)?;
        }
        Ok(())
    }
}
