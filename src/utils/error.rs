use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoffeeFilterError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Geocoding error: {message}")]
    GeocodingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Auth,
    Configuration,
    Validation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CoffeeFilterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::GeocodingError { .. } => ErrorCategory::Network,
            Self::ApiError { .. } => ErrorCategory::Api,
            Self::InvalidCredentials | Self::NotAuthenticated => ErrorCategory::Auth,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } | Self::SerializationError(_) => {
                ErrorCategory::Validation
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Api => ErrorSeverity::Medium,
            ErrorCategory::Auth | ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) if e.is_timeout() => "The server took too long to respond".to_string(),
            Self::HttpError(e) if e.is_connect() => "Could not reach the server".to_string(),
            Self::HttpError(_) => "A network error occurred".to_string(),
            Self::ApiError { message, .. } => message.clone(),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::NotAuthenticated => "You are not logged in".to_string(),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::SerializationError(e) => format!("Malformed JSON: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Missing setting '{}'", field),
            Self::ValidationError { field, message } => format!("{}: {}", field, message),
            Self::GeocodingError { message } => format!("Address lookup failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection and the configured API URL",
            ErrorCategory::Api => "Check the request and try again",
            ErrorCategory::Auth => "Run `coffee-filter login <username>` and try again",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Validation => "Correct the shop data and resubmit",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, CoffeeFilterError>;
