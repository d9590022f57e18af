use thiserror::Error;

#[derive(Error, Debug)]
pub enum AicError {
    #[error("Failed to connect to API: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API request failed: {status} - {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidParameterError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required parameter: {field}")]
    MissingParameterError { field: String },

    #[error("Unknown tool: {name}")]
    UnknownToolError { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Validation,
    Configuration,
    Internal,
}

impl AicError {
    pub fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        AicError::InvalidParameterError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AicError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AicError::HttpError(_) => ErrorCategory::Network,
            AicError::ApiStatusError { .. } => ErrorCategory::Api,
            AicError::InvalidParameterError { .. }
            | AicError::MissingParameterError { .. }
            | AicError::UnknownToolError { .. } => ErrorCategory::Validation,
            AicError::ConfigError { .. } => ErrorCategory::Configuration,
            AicError::IoError(_) | AicError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    /// 呼叫端的輸入問題，不是伺服器或遠端 API 的故障
    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                format!("Could not reach the Art Institute of Chicago API. {}", self)
            }
            ErrorCategory::Api => format!("The Art Institute of Chicago API rejected the request. {}", self),
            ErrorCategory::Validation => self.to_string(),
            ErrorCategory::Configuration => format!("Please check your configuration. {}", self),
            ErrorCategory::Internal => format!("Unexpected error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AicError>;
