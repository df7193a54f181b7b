use thiserror::Error;

/// 顯示給使用者的驗證訊息
pub const VALIDATION_MESSAGE: &str = "Please enter at least a few words to humanize.";

/// 呼叫外部服務失敗時顯示的訊息，不區分原因
pub const ORACLE_FAILURE_MESSAGE: &str =
    "An error occurred while humanizing the text. Please check your connection or API status.";

#[derive(Error, Debug)]
pub enum HumanizeError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Oracle error: {message}")]
    OracleError { message: String },

    #[error("API returned status {status}: {message}")]
    ApiStatusError { status: u16, message: String },

    #[error("A request is already in progress")]
    BusyError,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Oracle,
    Configuration,
    System,
}

impl HumanizeError {
    pub fn validation() -> Self {
        Self::ValidationError {
            message: VALIDATION_MESSAGE.to_string(),
        }
    }

    pub fn oracle() -> Self {
        Self::OracleError {
            message: ORACLE_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } | Self::BusyError => ErrorCategory::Input,
            Self::OracleError { .. } | Self::ApiStatusError { .. } | Self::HttpError(_) => {
                ErrorCategory::Oracle
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// 不含內部細節的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } | Self::OracleError { message } => message.clone(),
            Self::BusyError => "Please wait for the current request to finish.".to_string(),
            Self::ApiStatusError { .. } | Self::HttpError(_) => ORACLE_FAILURE_MESSAGE.to_string(),
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::SerializationError(_) => "Could not encode the result.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Provide at least five words of text and submit again.",
            ErrorCategory::Oracle => {
                "Check your network connection and that GEMINI_API_KEY is set, then retry."
            }
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags.",
            ErrorCategory::System => "Check file paths and permissions.",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => 1,
            ErrorCategory::Oracle => 2,
            ErrorCategory::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, HumanizeError>;
