use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdtError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed timetable ({context}): {message}")]
    MalformedInput { context: String, message: String },

    #[error("Unknown or unusable timezone: {value}")]
    TimezoneError { value: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EdtError {
    pub fn malformed(context: impl Into<String>, message: impl Into<String>) -> Self {
        EdtError::MalformedInput {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EdtError::IoError(_) => ErrorCategory::Io,
            EdtError::SerializationError(_) => ErrorCategory::Output,
            EdtError::MalformedInput { .. } => ErrorCategory::Input,
            EdtError::TimezoneError { .. }
            | EdtError::ConfigValidationError { .. }
            | EdtError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EdtError::IoError(_) => {
                "Check that the input file exists and the output location is writable"
            }
            EdtError::SerializationError(_) => "Re-run without --dry-run to write the calendar file",
            EdtError::MalformedInput { .. } => {
                "Save the timetable page again from the browser (complete web page) and re-run"
            }
            EdtError::TimezoneError { .. } => {
                "Use an IANA timezone name such as 'Europe/Paris'"
            }
            EdtError::ConfigValidationError { .. } | EdtError::InvalidConfigValueError { .. } => {
                "Fix the reported configuration value and try again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EdtError::IoError(e) => format!("Could not access a file: {}", e),
            EdtError::MalformedInput { context, message } => {
                format!("The timetable page could not be read ({}): {}", context, message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EdtError>;
