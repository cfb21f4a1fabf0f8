use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the management API. `description` carries the
/// human-readable detail the console prefers when present.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    /// Detail string for notifications: the description when the server sent
    /// one, otherwise the message itself.
    pub fn detail(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.message)
    }
}
