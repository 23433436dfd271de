//! Error types for port operations.

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// The identity provider refused the request. The message is the
    /// provider's own text, surfaced verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered with something we could not read.
    #[error("Invalid auth response: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    pub fn rejected(message: impl ToString) -> Self {
        Self::Rejected(message.to_string())
    }

    pub fn network(message: impl ToString) -> Self {
        Self::Network(message.to_string())
    }

    /// Check if the provider refused the credentials or request.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Row store errors with context for debugging.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepoError {
    /// No active session where one is required.
    #[error("Not signed in")]
    Unauthenticated,

    /// Transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend rejected the operation - includes operation name for tracing.
    #[error("Persistence error in {operation}: {message}")]
    Persistence {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Persistence error with operation context.
    pub fn persistence(operation: &'static str, message: impl ToString) -> Self {
        Self::Persistence {
            operation,
            message: message.to_string(),
        }
    }

    pub fn network(message: impl ToString) -> Self {
        Self::Network(message.to_string())
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Check if this is an Unauthenticated error.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

/// A session lookup that failed on the way to a row store call.
impl From<AuthError> for RepoError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Rejected(_) => Self::Unauthenticated,
            AuthError::Network(message) => Self::Network(message),
            AuthError::InvalidResponse(message) => Self::Serialization(message),
        }
    }
}

/// Photo upload errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    /// The source image could not be turned into JPEG bytes.
    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Blob storage refused the object.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl UploadError {
    pub fn encode(message: impl ToString) -> Self {
        Self::Encode(message.to_string())
    }

    pub fn network(message: impl ToString) -> Self {
        Self::Network(message.to_string())
    }

    pub fn storage(message: impl ToString) -> Self {
        Self::Storage(message.to_string())
    }
}

impl From<AuthError> for UploadError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Network(message) => Self::Network(message),
            AuthError::Rejected(message) | AuthError::InvalidResponse(message) => {
                Self::Storage(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_auth_error_displays_backend_message_verbatim() {
        let error = AuthError::rejected("Invalid login credentials");

        assert_eq!(error.to_string(), "Invalid login credentials");
        assert!(error.is_rejected());
        assert!(!AuthError::network("timed out").is_rejected());
    }

    #[test]
    fn persistence_error_carries_operation() {
        let error = RepoError::persistence("insert", "duplicate key");

        match &error {
            RepoError::Persistence { operation, message } => {
                assert_eq!(*operation, "insert");
                assert_eq!(message, "duplicate key");
            }
            _ => panic!("Expected Persistence variant"),
        }
        assert_eq!(error.to_string(), "Persistence error in insert: duplicate key");
        assert!(!error.is_unauthenticated());
        assert!(RepoError::Unauthenticated.is_unauthenticated());
    }

    #[test]
    fn auth_failures_keep_their_kind_across_ports() {
        assert_eq!(
            RepoError::from(AuthError::network("timed out")),
            RepoError::network("timed out")
        );
        assert_eq!(
            RepoError::from(AuthError::rejected("Invalid Refresh Token")),
            RepoError::Unauthenticated
        );
        assert_eq!(
            UploadError::from(AuthError::network("timed out")),
            UploadError::network("timed out")
        );
    }
}
