//! Error types for the deployment tool
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for deployment operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimum number of recognized arguments required for a reconcile run
pub const MIN_PARSED_ARGUMENTS: usize = 2;

/// One entry from the provider's structured error list
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// Provider-assigned error code
    #[serde(default)]
    pub code: i64,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Core error type for the deployment tool
///
/// Every variant is fatal for the run: nothing is retried or recovered
/// locally, the process reports the failing precondition or call and exits.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file is absent from the working directory
    #[error("configuration file not found, run with --regenerate to create a new one")]
    ConfigMissing,

    /// Configuration file exists but is unusable
    #[error("invalid configuration file: {0}")]
    ConfigInvalid(String),

    /// Fewer recognized arguments than the required minimum
    #[error("given only {0} arguments while minimum {MIN_PARSED_ARGUMENTS} required")]
    InsufficientArguments(usize),

    /// No zone alias among the arguments
    #[error("zone name not given within the arguments, add --zone to proceed")]
    MissingZone,

    /// No record name among the arguments
    #[error("record name not given within the arguments, add --name to proceed")]
    MissingName,

    /// Zone alias has no entry in the configured mapping
    #[error("given unknown zone name alias: {0}")]
    UnknownZone(String),

    /// Record name keeps fewer than 3 characters once non-letters are stripped
    #[error("given invalid record name: {0}")]
    InvalidName(String),

    /// Provider answered with a non-success HTTP status
    #[error("provider API responded with error code: {0}")]
    Transport(u16),

    /// Provider envelope carried `success: false`
    #[error("provider API responded with errors: {}", format_api_errors(.0))]
    Api(Vec<ApiErrorDetail>),

    /// Matched record carried an empty id at delete time
    #[error("given invalid DNS record identifier: {0:?}")]
    InvalidRecordIdentifier(String),

    /// HTTP client failure below the status-code level
    #[error("HTTP error: {0}")]
    Http(String),

    /// Filesystem errors while reading or writing the configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a ConfigInvalid error
    pub fn config_invalid(msg: impl Into<String>) -> Self {
        Self::ConfigInvalid(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// True for errors raised before or during input validation, as opposed
    /// to failures while talking to the provider.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::ConfigMissing
                | Error::ConfigInvalid(_)
                | Error::InsufficientArguments(_)
                | Error::MissingZone
                | Error::MissingName
                | Error::UnknownZone(_)
                | Error::InvalidName(_)
        )
    }
}

fn format_api_errors(errors: &[ApiErrorDetail]) -> String {
    if errors.is_empty() {
        return "(no error details)".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_list_is_rendered() {
        let err = Error::Api(vec![
            ApiErrorDetail {
                code: 81057,
                message: "record already exists".to_string(),
            },
            ApiErrorDetail {
                code: 9109,
                message: "invalid access token".to_string(),
            },
        ]);

        let rendered = err.to_string();
        assert!(rendered.contains("81057"));
        assert!(rendered.contains("record already exists"));
        assert!(rendered.contains("9109"));
    }

    #[test]
    fn empty_api_error_list_is_rendered() {
        let err = Error::Api(Vec::new());
        assert!(err.to_string().contains("no error details"));
    }

    #[test]
    fn usage_errors_are_classified() {
        assert!(Error::ConfigMissing.is_usage_error());
        assert!(Error::UnknownZone("lab".to_string()).is_usage_error());
        assert!(!Error::Transport(500).is_usage_error());
        assert!(!Error::Api(Vec::new()).is_usage_error());
    }
}
