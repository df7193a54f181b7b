use crate::adapters::gemini::{DEFAULT_MODEL, GEMINI_API_BASE};
use crate::core::prompt::DEFAULT_TOP_P;
use crate::domain::model::{Settings, Tone, DEFAULT_INTENSITY, MAX_INTENSITY, MIN_INTENSITY};
use crate::utils::error::{HumanizeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OracleConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub top_p: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub tone: Option<Tone>,
    pub intensity: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HumanizeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HumanizeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})，找不到時保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HumanizeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> &str {
        self.oracle.endpoint.as_deref().unwrap_or(GEMINI_API_BASE)
    }

    pub fn model(&self) -> &str {
        self.oracle.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// 未替換的 `${VAR}` 或空字串視為未設定
    pub fn api_key(&self) -> Option<&str> {
        self.oracle
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
    }

    pub fn top_p(&self) -> f32 {
        self.oracle.top_p.unwrap_or(DEFAULT_TOP_P)
    }

    pub fn tone(&self) -> Tone {
        self.defaults.tone.unwrap_or_default()
    }

    pub fn intensity(&self) -> u8 {
        self.defaults.intensity.unwrap_or(DEFAULT_INTENSITY)
    }

    pub fn settings(&self) -> Result<Settings> {
        Settings::new(self.tone(), self.intensity())
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("oracle.endpoint", self.endpoint())?;
        validate_non_empty_string("oracle.model", self.model())?;
        validate_range("oracle.top_p", self.top_p(), 0.01, 1.0)?;
        validate_range(
            "defaults.intensity",
            self.intensity(),
            MIN_INTENSITY,
            MAX_INTENSITY,
        )?;
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
