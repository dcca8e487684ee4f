use crate::config::{ClientConfig, DEFAULT_BANDS_PATH, DEFAULT_TIMEOUT_SECONDS};
use crate::core::{ConfigProvider, YearPolicy};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub validation: Option<ValidationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub bands_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub year_policy: Option<YearPolicy>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn into_client_config(self) -> ClientConfig {
        ClientConfig {
            year_policy: self.year_policy(),
            bands_path: self
                .source
                .bands_path
                .unwrap_or_else(|| DEFAULT_BANDS_PATH.to_string()),
            timeout_seconds: self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            base_url: self.source.base_url,
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn bands_path(&self) -> &str {
        self.source.bands_path.as_deref().unwrap_or(DEFAULT_BANDS_PATH)
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn year_policy(&self) -> YearPolicy {
        self.validation
            .as_ref()
            .and_then(|v| v.year_policy)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_client_config().validate()
    }
}

/// 替換環境變數 (例如 ${BANDS_HOST})；未設定的變數保持原樣
fn substitute_env_vars(content: &str) -> String {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}
