use crate::config::toml_config::TomlConfig;
use crate::config::ConfigOverrides;
use crate::domain::model::Tone;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

#[derive(Debug, Clone, Parser)]
#[command(name = "humanize-it")]
#[command(about = "Rewrite AI-generated text so it reads like a person wrote it")]
pub struct CliConfig {
    /// Text to humanize (reads stdin when neither --text nor --file is given)
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read the text to humanize from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Natural, Casual, Academic, Professional, Creative or Conversational
    #[arg(long)]
    pub tone: Option<Tone>,

    /// Rewrite intensity, 1-100
    #[arg(long)]
    pub intensity: Option<u8>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API key (falls back to GEMINI_API_KEY / API_KEY, then the config file)
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub endpoint: Option<String>,

    /// Also write the humanized text to this file
    #[arg(long)]
    pub copy_to: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            tone: self.tone,
            intensity: self.intensity,
        }
    }

    pub fn load_file_config(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => TomlConfig::from_file(path),
            None => Ok(TomlConfig::default()),
        }
    }

    /// `--text`，否則 `--file`，否則讀 stdin
    pub async fn read_input(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        if let Some(path) = &self.file {
            tracing::debug!("Reading input from {}", path.display());
            return Ok(tokio::fs::read_to_string(path).await?);
        }

        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        Ok(buffer)
    }
}
