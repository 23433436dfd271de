//! Identity provider adapter (GoTrue-compatible `/auth/v1`).

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use super::wire::{error_message, PasswordCredentials, SignUpResponse};
use super::{read_json, SupabaseClient};
use crate::infrastructure::ports::{AuthError, AuthPort, AuthUser, Session};

/// Email/password auth against the hosted identity provider.
///
/// The session lives in the shared [`SupabaseClient`], so the rest and storage
/// adapters see sign-in and sign-out immediately.
pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthPort for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let session = self
            .client
            .request_token("password", &PasswordCredentials { email, password })
            .await?;
        let user = session.user.clone();
        self.client.set_session(Some(session)).await;

        tracing::info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        tracing::debug!("Requesting sign-up");

        let response = self
            .client
            .anon(Method::POST, "/auth/v1/signup")
            .json(&PasswordCredentials { email, password })
            .send()
            .await
            .map_err(AuthError::network)?;

        match read_json::<SignUpResponse>(response).await? {
            SignUpResponse::Session(token) => {
                let session = token.into_session(self.client.now());
                let user = session.user.clone();
                self.client.set_session(Some(session)).await;
                tracing::info!(user_id = %user.id, "Signed up");
                Ok(user)
            }
            SignUpResponse::User(user) => {
                let user = AuthUser::from(user);
                tracing::info!(user_id = %user.id, "Signed up, email confirmation pending");
                Ok(user)
            }
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.client.take_session().await else {
            tracing::debug!("Sign-out without a session");
            return Ok(());
        };

        let response = self
            .client
            .anon(Method::POST, "/auth/v1/logout")
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(AuthError::network)?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(user_id = %session.user.id, "Signed out");
            return Ok(());
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                tracing::debug!(%status, "Session already gone on the server");
                Ok(())
            }
            _ => Err(AuthError::Rejected(error_message(response).await)),
        }
    }

    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        self.client.live_session().await
    }
}
