pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::clipboard::{FileClipboard, MemoryClipboard};
pub use crate::adapters::gemini::GeminiClient;
pub use crate::config::{toml_config::TomlConfig, AppConfig, ConfigOverrides};
pub use crate::core::session::{HumanizeSession, Phase};
pub use crate::domain::model::{HumanizeResult, Settings, Tone};
pub use crate::utils::error::{HumanizeError, Result};
