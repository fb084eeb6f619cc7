use std::{env, path::PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    ds::alphavantage::ALPHAVANTAGE_API_DEFAULT,
    error::{FsError, FsResult},
};

pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    pub alphavantage_api: String,
    pub alphavantage_api_key: String,
    pub data_dir: String,
    pub external_validation: bool,
    pub http_timeout_secs: u64,
    pub http_max_retries: u32,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            alphavantage_api: ALPHAVANTAGE_API_DEFAULT.to_string(),
            alphavantage_api_key: "demo".to_string(),
            data_dir: "".to_string(),
            external_validation: true,
            http_timeout_secs: 30,
            http_max_retries: 3,
        }
    }
}

impl FsConfig {
    /// Loads the stored configuration, the API key env var takes precedence over the file.
    pub fn load() -> FsResult<Self> {
        let mut config = Self::load_stored()?;

        if let Ok(api_key) = env::var(API_KEY_ENV) {
            if !api_key.trim().is_empty() {
                debug!("Use API key from {API_KEY_ENV}");
                config.alphavantage_api_key = api_key.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn load_stored() -> FsResult<Self> {
        Ok(confy::load(env!("CARGO_PKG_NAME"), None)?)
    }

    pub fn store(&self) -> FsResult<()> {
        confy::store(env!("CARGO_PKG_NAME"), None, self)?;
        Ok(())
    }

    pub fn data_dir(&self) -> Option<PathBuf> {
        let dir = self.data_dir.trim();
        if dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(dir))
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("alphavantage_api", self.alphavantage_api.to_string()),
            ("alphavantage_api_key", self.alphavantage_api_key.to_string()),
            ("data_dir", self.data_dir.to_string()),
            ("external_validation", self.external_validation.to_string()),
            ("http_timeout_secs", self.http_timeout_secs.to_string()),
            ("http_max_retries", self.http_max_retries.to_string()),
        ]
    }

    pub fn set(&mut self, key: &str, value: &str) -> FsResult<()> {
        let value = value.trim();

        match key.trim().to_lowercase().as_str() {
            "alphavantage_api" => {
                url::Url::parse(value)?;
                self.alphavantage_api = value.to_string();
            }
            "alphavantage_api_key" => {
                self.alphavantage_api_key = value.to_string();
            }
            "data_dir" => {
                self.data_dir = value.to_string();
            }
            "external_validation" => {
                self.external_validation = parse_bool(value).ok_or(FsError::Invalid {
                    code: "INVALID_CONFIG_VALUE",
                    message: format!("Invalid boolean '{value}'"),
                })?;
            }
            "http_timeout_secs" => {
                self.http_timeout_secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(FsError::Invalid {
                        code: "INVALID_CONFIG_VALUE",
                        message: format!("Timeout must be positive seconds, got '{value}'"),
                    })?;
            }
            "http_max_retries" => {
                self.http_max_retries = value.parse().map_err(|_| FsError::Invalid {
                    code: "INVALID_CONFIG_VALUE",
                    message: format!("Invalid retry count '{value}'"),
                })?;
            }
            _ => {
                return Err(FsError::Invalid {
                    code: "UNKNOWN_CONFIG_KEY",
                    message: format!("Unknown config key '{key}'"),
                });
            }
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
