use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Authentication required: {message}")]
    AuthRequired { message: String, hint: String },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Normalized failure surfaced by every client operation.
///
/// Each variant displays as its bare human-readable message so callers can
/// show it directly. Use [`ApiError::message`] and [`ApiError::status`] when
/// the kind does not matter.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Transport { endpoint: String, message: String },
    #[error("{message}")]
    Authentication {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },
    #[error("{message}")]
    Validation {
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("{message}")]
    Server {
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("{message}")]
    MalformedResponse {
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("{message}")]
    InvalidRequest { endpoint: String, message: String },
    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication { status, .. } => *status,
            ApiError::Validation { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::MalformedResponse { status, .. } => Some(*status),
            ApiError::Transport { .. }
            | ApiError::InvalidRequest { .. }
            | ApiError::Storage(_) => None,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ApiError::Transport { endpoint, .. }
            | ApiError::Authentication { endpoint, .. }
            | ApiError::Validation { endpoint, .. }
            | ApiError::Server { endpoint, .. }
            | ApiError::MalformedResponse { endpoint, .. }
            | ApiError::InvalidRequest { endpoint, .. } => Some(endpoint),
            ApiError::Storage(_) => None,
        }
    }

    /// True when the failure means the stored session can no longer be used
    /// and the user must log in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Authentication { .. })
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Credential file is corrupt: {message}")]
    CredentialFileCorrupt { message: String },
    #[error("Stored credentials are incomplete: {present} is set but {missing} is not")]
    PartialBundle {
        present: &'static str,
        missing: &'static str,
    },
    #[error("Stored user id '{value}' is not a number")]
    InvalidUserId { value: String },
    #[error("Failed to clear stored credentials: {failed_keys:?}")]
    ClearFailed { failed_keys: Vec<&'static str> },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration field '{field}' is missing")]
    MissingField { field: String, hint: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Authentication { .. } => ErrorSeverity::High,
                ApiError::Server { .. } => ErrorSeverity::High,
                ApiError::Storage(_) => ErrorSeverity::Critical,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(StorageError::PartialBundle { .. }) => ErrorSeverity::Critical,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(e) if e.requires_login() => {
                Some("Run 'flexiplan auth login' to sign in again".to_string())
            }
            AppError::Api(ApiError::Transport { .. }) => {
                Some("Check your connection and the configured server URL".to_string())
            }
            AppError::Cli(CliError::AuthRequired { hint, .. }) => Some(hint.clone()),
            AppError::Config(ConfigError::MissingField { hint, .. }) => Some(hint.clone()),
            AppError::Storage(StorageError::PartialBundle { .. }) => {
                Some("Run 'flexiplan auth logout' to reset stored credentials".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_bare_message() {
        let err = ApiError::Validation {
            endpoint: "/api/users/1/tasks/".to_string(),
            status: 404,
            message: "not found".to_string(),
        };
        assert_eq!(format!("{}", err), "not found");
        assert_eq!(err.message(), "not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.endpoint(), Some("/api/users/1/tasks/"));
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = ApiError::Transport {
            endpoint: "/api/login/".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(!err.requires_login());
    }

    #[test]
    fn test_missing_refresh_token_requires_login() {
        let err = ApiError::Authentication {
            endpoint: "/api/refresh-token/".to_string(),
            status: None,
            message: "No refresh token found".to_string(),
        };
        assert!(err.requires_login());
        assert_eq!(err.status(), None);

        let app_err = AppError::Api(err);
        assert_eq!(app_err.severity(), ErrorSeverity::High);
        assert!(app_err.troubleshooting_hint().is_some());
        assert_eq!(format!("{}", app_err), "No refresh token found");
    }

    #[test]
    fn test_storage_error_wraps_into_api_error() {
        let err: ApiError = StorageError::KeyringError("locked".to_string()).into();
        assert_eq!(err.message(), "Keyring error: locked");
        assert_eq!(err.endpoint(), None);
    }

    #[test]
    fn test_partial_bundle_is_critical() {
        let app_err = AppError::Storage(StorageError::PartialBundle {
            present: "access_token",
            missing: "refresh_token",
        });
        assert_eq!(app_err.severity(), ErrorSeverity::Critical);
        assert_eq!(
            format!("{}", app_err),
            "StorageError: Stored credentials are incomplete: access_token is set but refresh_token is not"
        );
    }

    #[test]
    fn test_cli_error_display() {
        let cli_err = CliError::InvalidArguments("invalid arguments".to_string());
        assert_eq!(
            format!("{}", cli_err),
            "Invalid arguments: invalid arguments"
        );
        let app_err = AppError::Cli(CliError::AuthRequired {
            message: "not logged in".to_string(),
            hint: "hint".to_string(),
        });
        assert_eq!(app_err.troubleshooting_hint(), Some("hint".to_string()));
    }
}
