use thiserror::Error;

pub const GENERIC_FAILURE: &str =
    "An error occurred while processing your request. Please try again.";

#[derive(Error, Debug)]
pub enum ConsultationError {
    #[error("Request rejected by bot filter: {reason}")]
    SuspectedBot { reason: String },

    #[error("Malformed request payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Request body could not be read: {reason}")]
    UnreadableBody { reason: String },

    #[error("Validation failed on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Email relay access key is not configured (expected in ${var})")]
    RelayNotConfigured { var: String },

    #[error("Email relay rejected the message (status {status}): {body}")]
    RelayRejected { status: u16, body: String },

    #[error("Email relay request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Bot,
    Client,
    Relay,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConsultationError {
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SuspectedBot { .. } => ErrorCategory::Bot,
            Self::MalformedPayload(_) | Self::UnreadableBody { .. } | Self::Validation { .. } => {
                ErrorCategory::Client
            }
            Self::RelayNotConfigured { .. } | Self::RelayRejected { .. } | Self::Network(_) => {
                ErrorCategory::Relay
            }
            Self::IoError(_)
            | Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Bot | ErrorCategory::Client => ErrorSeverity::Low,
            ErrorCategory::Relay => match self {
                Self::RelayNotConfigured { .. } => ErrorSeverity::Critical,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Internal => ErrorSeverity::High,
        }
    }

    /// HTTP status the submission endpoint answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Bot | ErrorCategory::Client => 400,
            _ => 500,
        }
    }

    /// Text safe to show to the person who submitted the form.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SuspectedBot { .. } | Self::MalformedPayload(_) | Self::UnreadableBody { .. } => {
                "Invalid request.".to_string()
            }
            Self::Validation { message, .. } => message.clone(),
            Self::RelayNotConfigured { .. } => "Email service is not configured.".to_string(),
            Self::RelayRejected { .. } => "Failed to send email.".to_string(),
            Self::Network(_) => "Network error.".to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::SuspectedBot { .. } => "No action needed; request was filtered".to_string(),
            Self::MalformedPayload(_) => {
                "Check the client sends a JSON object with camelCase field names".to_string()
            }
            Self::UnreadableBody { .. } => {
                "Check the client sends a small JSON body; oversized bodies are refused".to_string()
            }
            Self::Validation { field, .. } => format!("Ask the submitter to correct '{}'", field),
            Self::RelayNotConfigured { var } => format!(
                "Set {} in the server environment and redeploy; follow up the logged request manually",
                var
            ),
            Self::RelayRejected { status, .. } => format!(
                "Email provider answered {}; verify the access key and recipient, then follow up the logged request manually",
                status
            ),
            Self::Network(_) => {
                "Check outbound connectivity to the email provider; follow up the logged request manually"
                    .to_string()
            }
            Self::IoError(_) => "Check the file path and permissions".to_string(),
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file, flags and environment variables".to_string()
            }
            Self::Internal { .. } => "Inspect the server logs for the failing request".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsultationError>;
