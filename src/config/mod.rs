pub mod toml_config;

use crate::core::{ConfigProvider, YearPolicy};
use crate::utils::error::Result;
use crate::utils::validation::{validate_api_path, validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_BANDS_PATH: &str = "/api/bands";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub bands_path: String,
    pub timeout_seconds: u64,
    pub year_policy: YearPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bands_path: DEFAULT_BANDS_PATH.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            year_policy: YearPolicy::Strict,
        }
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bands_path(&self) -> &str {
        &self.bands_path
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn year_policy(&self) -> YearPolicy {
        self.year_policy
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_api_path("bands_path", &self.bands_path)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_app() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bands_url(), "http://127.0.0.1:5000/api/bands");
    }

    #[test]
    fn test_bands_url_joins_without_double_slash() {
        let config = ClientConfig {
            base_url: "https://bands.example.com/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.bands_url(), "https://bands.example.com/api/bands");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = ClientConfig {
            timeout_seconds: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
