use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubsError {
    #[error("Malformed endpoint target: {target}")]
    MalformedEndpoint { target: String },

    #[error("Invalid domain map: {message}")]
    InvalidDomainMap { message: String },

    #[error("Unsupported transport network: {network}")]
    UnsupportedTransport { network: String },

    #[error("Invalid server config: {message}")]
    InvalidServerConfig { message: String },

    #[error("Link encoding failed: {message}")]
    EncodingError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
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
    Configuration,
    Input,
    Encoding,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SubsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SubsError::InvalidConfigValueError { .. } | SubsError::MissingConfigError { .. } => {
                ErrorCategory::Configuration
            }
            SubsError::MalformedEndpoint { .. }
            | SubsError::InvalidDomainMap { .. }
            | SubsError::UnsupportedTransport { .. }
            | SubsError::InvalidServerConfig { .. }
            | SubsError::SerializationError(_) => ErrorCategory::Input,
            SubsError::EncodingError { .. } | SubsError::UrlError(_) => ErrorCategory::Encoding,
            SubsError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::System => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SubsError::MalformedEndpoint { target } => {
                format!(
                    "Check the domain map: \"{}\" must be an http(s) URL or a host[:port] pair",
                    target
                )
            }
            SubsError::InvalidDomainMap { .. } => {
                "Each domain map entry needs a \"target\" field".to_string()
            }
            SubsError::UnsupportedTransport { network } => {
                format!(
                    "Transport \"{}\" cannot be encoded into a link; only ws and grpc are supported",
                    network
                )
            }
            SubsError::InvalidServerConfig { .. } => {
                "Check the inbound's settings.clients block in the server config".to_string()
            }
            SubsError::EncodingError { .. } => {
                "Check the endpoint host and client credentials for unencodable values".to_string()
            }
            SubsError::IoError(_) => {
                "Check that the input files exist and the save directory is writable".to_string()
            }
            SubsError::SerializationError(_) => {
                "Check that the input files contain valid JSON".to_string()
            }
            SubsError::UrlError(_) => "Check the endpoint target URL syntax".to_string(),
            SubsError::InvalidConfigValueError { field, .. }
            | SubsError::MissingConfigError { field } => {
                format!("Fix the --{} argument", field.replace('_', "-"))
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input file problem: {}", self),
            ErrorCategory::Encoding => format!("Link generation problem: {}", self),
            ErrorCategory::System => format!("System problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SubsError>;
