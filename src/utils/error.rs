use thiserror::Error;

/// 上游錯誤分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    RateLimited,
    ExternalFailure,
}

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Employee not found with ID: {id}")]
    NotFound { id: String },

    #[error("Rate limit exceeded: {message}")]
    RateLimited { message: String },

    #[error("External API failure: {message}")]
    ExternalFailure { message: String, retryable: bool },

    #[error("Validation error on '{field}' (value: {value}): {reason}")]
    ValidationFailure {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DirectoryError {
    /// 只有來自上游的錯誤才有分類
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            DirectoryError::NotFound { .. } => Some(ErrorKind::NotFound),
            DirectoryError::RateLimited { .. } => Some(ErrorKind::RateLimited),
            DirectoryError::ExternalFailure { .. } => Some(ErrorKind::ExternalFailure),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            DirectoryError::RateLimited { .. } => true,
            DirectoryError::ExternalFailure { retryable, .. } => *retryable,
            _ => false,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::NotFound { id } => format!("No employee exists with ID '{}'", id),
            DirectoryError::RateLimited { .. } => {
                "The employee service is throttling requests".to_string()
            }
            DirectoryError::ExternalFailure { message, .. } => {
                format!("The employee service could not complete the request: {}", message)
            }
            DirectoryError::ValidationFailure { field, reason, .. } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            DirectoryError::ConfigError { message } => format!("Configuration problem: {}", message),
            DirectoryError::IoError(e) => format!("File access failed: {}", e),
            DirectoryError::SerializationError(e) => format!("Could not encode the request: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DirectoryError::NotFound { .. } => "Check the employee ID with the `list` command",
            DirectoryError::RateLimited { .. } => "Wait a moment before sending more requests",
            DirectoryError::ExternalFailure { retryable: true, .. } => {
                "Check that the upstream service is reachable and try again"
            }
            DirectoryError::ExternalFailure { retryable: false, .. } => {
                "The upstream response was malformed or rejected; check the upstream service version"
            }
            DirectoryError::ValidationFailure { .. } => "Correct the input and run the command again",
            DirectoryError::ConfigError { .. } => "Review the configuration file and CLI flags",
            DirectoryError::IoError(_) => "Check the file path and its permissions",
            DirectoryError::SerializationError(_) => "Check the values passed to the command",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
