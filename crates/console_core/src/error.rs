use shared::error::ApiError;
use thiserror::Error;

/// Failure of a management-API call. The console never retries on its own;
/// recovery is user-initiated resubmission.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("failed to reach the server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected the request: {0}")]
    Api(#[from] ApiError),
    #[error("unexpected response from the server: {0}")]
    UnexpectedResponse(String),
    #[error("no resource client is configured")]
    Unavailable,
}

impl RemoteError {
    /// Detail string for notifications, preferring the server-supplied
    /// description when one exists.
    pub fn detail(&self) -> String {
        match self {
            Self::Api(err) => err.detail().to_string(),
            other => other.to_string(),
        }
    }
}

/// User input rejected by a synchronous or async-derived rule. Surfaced
/// inline on the offending field; never aborts the wizard session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a {resource} named '{name}' already exists")]
    DuplicateName { resource: &'static str, name: String },
    #[error("'{name}' does not match the name pattern of user store '{domain}'")]
    InvalidNamePattern { domain: String, name: String },
    #[error("name must not be empty")]
    EmptyName,
    #[error("unknown user store '{domain}'")]
    UnknownUserStore { domain: String },
    #[error("'{uri}' is not a valid URI: {reason}")]
    InvalidUri { uri: String, reason: String },
}
