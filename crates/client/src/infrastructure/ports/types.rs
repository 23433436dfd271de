//! Types that cross port boundaries.

use chrono::{DateTime, Utc};
use pineat_domain::UserId;

/// The authenticated user behind a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// An established session with the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// `None` when the provider did not say.
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

impl Session {
    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    /// A session with no expiry is never considered expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
