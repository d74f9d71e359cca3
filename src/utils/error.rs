use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundlesError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request failed: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected response shape: {message}")]
    UnexpectedShape { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid price '{value}' for product {sku}")]
    InvalidPrice { sku: String, value: String },

    #[error("Worker error: {message}")]
    WorkerError { message: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Computation,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BundlesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::SerializationError(_) | Self::UnexpectedShape { .. } => ErrorCategory::Data,
            Self::InvalidPrice { .. } | Self::WorkerError { .. } => ErrorCategory::Computation,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::TemplateError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // pricing failures degrade to a zero total instead of failing the view
            ErrorCategory::Computation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check network connectivity and that the endpoint is reachable",
            Self::HttpStatus { status, .. } if *status >= 500 => {
                "The product API is failing, try again later"
            }
            Self::HttpStatus { .. } => "Check the API endpoint path and access rights",
            Self::SerializationError(_) | Self::UnexpectedShape { .. } => {
                "Make sure the endpoint returns a supported product payload"
            }
            Self::InvalidPrice { .. } => "Fix the product feed so every price is a decimal number",
            Self::WorkerError { .. } => "Disable the background worker and retry",
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::TemplateError { .. } => "Report this as a bug in the view templates",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the configuration values",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Unable to load products. {}", self),
            ErrorCategory::Data => format!("The product data could not be read. {}", self),
            ErrorCategory::Computation => format!("Price calculation failed. {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration. {}", self),
            ErrorCategory::System => format!("System error. {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BundlesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message_is_verbatim() {
        let err = BundlesError::HttpStatus {
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API request failed: 503 Service Unavailable");
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_computation_errors_are_low_severity() {
        let err = BundlesError::WorkerError {
            message: "panicked".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().starts_with("Price calculation failed."));
    }

    #[test]
    fn test_config_errors() {
        let err = BundlesError::MissingConfigError {
            field: "source.endpoint".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.recovery_suggestion(), "Review the configuration values");
    }
}
