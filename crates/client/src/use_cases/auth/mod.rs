//! Sign-in, sign-up and sign-out screens.

use std::sync::Arc;

use crate::infrastructure::ports::{AuthError, AuthPort};

/// Screen state for the account forms.
///
/// Backend rejections are shown verbatim, e.g. "Invalid login credentials".
pub struct AuthFlow {
    auth: Arc<dyn AuthPort>,
    error_message: Option<String>,
}

impl AuthFlow {
    pub fn new(auth: Arc<dyn AuthPort>) -> Self {
        Self {
            auth,
            error_message: None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns true on success.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> bool {
        self.error_message = None;
        let result = self.auth.sign_in(email, password).await.map(|_| ());
        self.settle("sign in", result)
    }

    /// Returns true on success, whether or not a session was started.
    pub async fn sign_up(&mut self, email: &str, password: &str) -> bool {
        self.error_message = None;
        let result = self.auth.sign_up(email, password).await.map(|_| ());
        self.settle("sign up", result)
    }

    pub async fn sign_out(&mut self) -> bool {
        self.error_message = None;
        let result = self.auth.sign_out().await;
        self.settle("sign out", result)
    }

    /// Whether the app should open on the main screen rather than login.
    ///
    /// A session that could not be refreshed for lack of connectivity still
    /// counts; the next request retries the refresh.
    pub async fn has_session(&self) -> bool {
        match self.auth.current_session().await {
            Ok(session) => session.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed, keeping session");
                true
            }
        }
    }

    fn settle(&mut self, action: &'static str, result: Result<(), AuthError>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(action, error = %e, "Auth request failed");
                self.error_message = Some(e.to_string());
                false
            }
        }
    }
}
