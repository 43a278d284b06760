//! Error types shared across the catalog and its collaborators

use thiserror::Error;

/// Failure of a call to an external collaborator (auth, data, storage).
///
/// Callers never branch on the cause when talking to the user: every variant
/// flattens to the same generic message via [`CollaboratorError::user_message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for collaborator calls
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;

impl CollaboratorError {
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Self::Decode(msg.into())
    }

    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// The one message shown to users regardless of cause
    pub fn user_message(&self) -> &'static str {
        "Something went wrong. Please try again."
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<serde_json::Error> for CollaboratorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::io::Error> for CollaboratorError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Errors building a [`crate::CatalogStore`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate tool id in catalog: {0}")]
    DuplicateId(String),
}

/// Outcome of a failed Session or Role gate check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// No usable session; callers redirect to the login page
    #[error("Sign in required")]
    Unauthenticated,

    #[error("You don't have admin permissions.")]
    Forbidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_flattens_to_one_message() {
        let errors = vec![
            CollaboratorError::network("timeout"),
            CollaboratorError::Unauthorized("jwt expired".to_string()),
            CollaboratorError::NotFound("row".to_string()),
            CollaboratorError::Backend {
                status: 500,
                message: "boom".to_string(),
            },
        ];

        let messages: Vec<_> = errors.iter().map(|e| e.user_message()).collect();
        assert!(messages.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_json_error_becomes_decode() {
        let err: CollaboratorError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, CollaboratorError::Decode(_)));
    }
}
