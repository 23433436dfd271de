//! Hosted backend adapters (auth, rest, storage over HTTP).
//!
//! All three adapters share one [`SupabaseClient`] handle. The handle owns the
//! HTTP connection pool and the current session, and is passed in explicitly
//! rather than living in a global.

mod auth;
mod rest;
mod storage;
mod wire;


use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use tokio::sync::{Mutex, RwLock};

use crate::config::{ClientConfig, ConfigError};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::ports::{AuthError, ClockPort, Session};

use wire::{error_message, RefreshTokenGrant, TokenResponse};

pub use auth::SupabaseAuth;
pub use rest::SupabaseLocationRepo;
pub use storage::SupabaseMediaStore;

/// Shared connection handle for the hosted backend.
///
/// Cheap to clone; clones share the session. An expired session is refreshed
/// here before any authorized request goes out, so every adapter sends the
/// same live token.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    clock: Arc<dyn ClockPort>,
    session: Arc<RwLock<Option<Session>>>,
    /// Held for the duration of a refresh so concurrent callers share one.
    refresh_lock: Arc<Mutex<()>>,
}

impl SupabaseClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            anon_key: config.anon_key.clone(),
            clock: Arc::new(SystemClock::new()),
            session: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Use `clock` for session expiry instead of the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn ClockPort>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub(crate) async fn set_session(&self, session: Option<Session>) {
        *self.session.write().await = session;
    }

    pub(crate) async fn take_session(&self) -> Option<Session> {
        self.session.write().await.take()
    }

    /// The stored session, refreshed first if it has expired.
    ///
    /// Only one refresh runs at a time; callers arriving meanwhile wait and
    /// pick up its result. A refresh never overwrites a session that changed
    /// while it was in flight, so a sign-out during a refresh sticks.
    ///
    /// The session is dropped when the provider rejects the refresh token.
    /// Transport failures keep it and come back as the error.
    pub(crate) async fn live_session(&self) -> Result<Option<Session>, AuthError> {
        match self.session.read().await.as_ref() {
            None => return Ok(None),
            Some(session) if !session.is_expired(self.now()) => return Ok(Some(session.clone())),
            Some(_) => {}
        }

        let _refreshing = self.refresh_lock.lock().await;

        let expired = match self.session.read().await.clone() {
            None => return Ok(None),
            Some(session) if !session.is_expired(self.now()) => return Ok(Some(session)),
            Some(session) => session,
        };

        let Some(refresh_token) = expired.refresh_token.as_deref() else {
            tracing::debug!("Session expired without a refresh token");
            return Ok(self.replace_if_current(&expired, None).await);
        };

        match self
            .request_token("refresh_token", &RefreshTokenGrant { refresh_token })
            .await
        {
            Ok(refreshed) => {
                tracing::debug!(user_id = %refreshed.user.id, "Session refreshed");
                Ok(self.replace_if_current(&expired, Some(refreshed)).await)
            }
            Err(e @ AuthError::Rejected(_)) => {
                tracing::warn!(error = %e, "Session refresh rejected, signing out");
                Ok(self.replace_if_current(&expired, None).await)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session refresh failed, keeping session");
                Err(e)
            }
        }
    }

    /// Store `next` only if the slot still holds `expected`. Returns what the
    /// slot holds afterwards.
    async fn replace_if_current(
        &self,
        expected: &Session,
        next: Option<Session>,
    ) -> Option<Session> {
        let mut slot = self.session.write().await;
        let unchanged = slot
            .as_ref()
            .is_some_and(|current| current.access_token == expected.access_token);
        if unchanged {
            *slot = next;
        } else {
            tracing::debug!("Session changed during refresh, discarding result");
        }
        slot.clone()
    }

    pub(crate) async fn request_token(
        &self,
        grant_type: &str,
        body: &impl serde::Serialize,
    ) -> Result<Session, AuthError> {
        tracing::debug!(grant_type, "Requesting auth token");

        let response = self
            .anon(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", grant_type)])
            .json(body)
            .send()
            .await
            .map_err(AuthError::network)?;

        let token: TokenResponse = read_json(response).await?;
        Ok(token.into_session(self.now()))
    }

    /// Request carrying only the project key.
    pub(crate) fn anon(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Request authorized as the current user, or as anon without a session.
    ///
    /// Refreshes an expired session first. The token is fixed once the
    /// builder is returned; a sign-out racing with the request does not
    /// affect it.
    pub(crate) async fn authorized(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, AuthError> {
        let token = match self.live_session().await? {
            Some(session) => session.access_token,
            None => self.anon_key.clone(),
        };
        Ok(self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(token))
    }
}

pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, AuthError> {
    if !response.status().is_success() {
        return Err(AuthError::Rejected(error_message(response).await));
    }

    response
        .json()
        .await
        .map_err(|e| AuthError::InvalidResponse(e.to_string()))
}
