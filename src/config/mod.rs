#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::gemini::GeminiClient;
use crate::config::toml_config::TomlConfig;
use crate::domain::model::{Settings, Tone};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};

pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// 命令列或呼叫端提供的覆蓋值，優先於設定檔
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub tone: Option<Tone>,
    pub intensity: Option<u8>,
}

/// 合併後的最終配置：內建預設 <- TOML <- 環境變數 <- 覆蓋值
#[derive(Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub top_p: f32,
    pub settings: Settings,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("top_p", &self.top_p)
            .field("settings", &self.settings)
            .finish()
    }
}

impl AppConfig {
    pub fn resolve(file: &TomlConfig, overrides: &ConfigOverrides) -> Result<Self> {
        Self::resolve_with_env(file, overrides, |name| std::env::var(name).ok())
    }

    /// `env` 查環境變數，測試時可替換
    pub fn resolve_with_env<F>(
        file: &TomlConfig,
        overrides: &ConfigOverrides,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = overrides
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| api_key_from_env(&env))
            .or_else(|| file.api_key().map(str::to_string));

        let mut settings = file.settings()?;
        if let Some(tone) = overrides.tone {
            settings.set_tone(tone);
        }
        if let Some(intensity) = overrides.intensity {
            settings.set_intensity(intensity)?;
        }

        Ok(Self {
            endpoint: overrides
                .endpoint
                .clone()
                .unwrap_or_else(|| file.endpoint().to_string()),
            model: overrides
                .model
                .clone()
                .unwrap_or_else(|| file.model().to_string()),
            api_key,
            top_p: file.top_p(),
            settings,
        })
    }

    /// 沒有 API key 不算配置錯誤，呼叫時才會失敗
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn build_client(&self) -> GeminiClient {
        GeminiClient::new(self.api_key.clone())
            .with_endpoint(self.endpoint.clone())
            .with_model(self.model.clone())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.endpoint)?;
        validate_non_empty_string("model", &self.model)?;
        validate_range("top_p", self.top_p, 0.01, 1.0)?;
        Ok(())
    }
}

fn api_key_from_env(env: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| env(name))
        .find(|value| !value.trim().is_empty())
}
