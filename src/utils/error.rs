use thiserror::Error;

/// Message carried by [`CalcError::InvalidFormat`] when an expression holds no call.
pub const INVALID_FORMAT_MESSAGE: &str =
    "Invalid input format. Please use a format like C(10,3) or P(5,2).";

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("{message}")]
    InvalidFormat { message: String },

    #[error("Arithmetic overflow while computing {operation}")]
    Overflow { operation: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Arithmetic,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn invalid_format() -> Self {
        CalcError::InvalidFormat {
            message: INVALID_FORMAT_MESSAGE.to_string(),
        }
    }

    pub fn overflow(operation: impl Into<String>) -> Self {
        CalcError::Overflow {
            operation: operation.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::InvalidFormat { .. } => ErrorCategory::Input,
            CalcError::Overflow { .. } => ErrorCategory::Arithmetic,
            CalcError::IoError(_) | CalcError::SerializationError(_) | CalcError::CsvError(_) => {
                ErrorCategory::Io
            }
            CalcError::ConfigValidationError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Arithmetic => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CalcError::InvalidFormat { .. } => {
                "Write at least one call such as C(10,3) or P(5,2)".to_string()
            }
            CalcError::Overflow { .. } => {
                "Use smaller arguments; results must fit in an unsigned 128-bit integer"
                    .to_string()
            }
            CalcError::IoError(_) => "Check that the file exists and is readable".to_string(),
            CalcError::SerializationError(_) | CalcError::CsvError(_) => {
                "Check that the output directory is writable".to_string()
            }
            CalcError::ConfigValidationError { field, .. }
            | CalcError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the configuration file", field)
            }
            CalcError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::InvalidFormat { message } => message.clone(),
            CalcError::Overflow { operation } => {
                format!("The result of {} is too large to compute exactly", operation)
            }
            other => other.to_string(),
        }
    }
}
