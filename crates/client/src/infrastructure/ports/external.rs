//! External service ports: identity provider and blob storage.

use async_trait::async_trait;

use super::error::{AuthError, UploadError};
use super::types::{AuthUser, Session};

// =============================================================================
// Identity Provider
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Authenticate with email and password and establish a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    /// Create an account. A session is established only when the provider
    /// hands one back (no email confirmation pending).
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    /// Drop the current session. Succeeds when there is none.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The active session, if any, refreshed first when it has expired.
    ///
    /// Fails only when a refresh could not reach the provider; the stored
    /// session is kept in that case.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;
}

// =============================================================================
// Blob Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStorePort: Send + Sync {
    /// Store `bytes` under `name` in `bucket`. Existing objects are not
    /// overwritten.
    async fn put_object(
        &self,
        bucket: &str,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), UploadError>;

    /// Publicly resolvable URL of an object. No request is made.
    fn public_url(&self, bucket: &str, name: &str) -> String;
}
