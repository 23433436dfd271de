//! Wire types and error-body parsing for the hosted backend.

use chrono::{DateTime, Duration, Utc};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::ports::{AuthUser, Session};
use pineat_domain::UserId;

/// Keys that carry a human-readable message, in priority order.
/// GoTrue uses `error_description`/`msg`, PostgREST and storage `message`.
const MESSAGE_KEYS: [&str; 4] = ["error_description", "msg", "message", "error"];

#[derive(Debug, Serialize)]
pub(crate) struct PasswordCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshTokenGrant<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<WireUser> for AuthUser {
    fn from(user: WireUser) -> Self {
        Self {
            id: UserId::from_uuid(user.id),
            email: user.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: WireUser,
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)));

        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// Sign-up answers with a full session when the account is confirmed
/// immediately, and with the bare user when email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignUpResponse {
    Session(TokenResponse),
    User(WireUser),
}

/// Read the failure message from a non-success response.
pub(crate) async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    parse_error_message(status, &body)
}

pub(crate) fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in MESSAGE_KEYS {
            if let Some(Value::String(message)) = map.get(key) {
                if !message.is_empty() {
                    return message.clone();
                }
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn prefers_error_description_then_msg_then_message() {
        assert_eq!(
            parse_error_message(
                StatusCode::BAD_REQUEST,
                r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#
            ),
            "Invalid login credentials"
        );
        assert_eq!(
            parse_error_message(
                StatusCode::BAD_REQUEST,
                r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#
            ),
            "Invalid login credentials"
        );
        assert_eq!(
            parse_error_message(
                StatusCode::CONFLICT,
                r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint"}"#
            ),
            "duplicate key value violates unique constraint"
        );
        assert_eq!(
            parse_error_message(StatusCode::BAD_REQUEST, r#"{"error":"Duplicate"}"#),
            "Duplicate"
        );
    }

    #[test]
    fn falls_back_to_body_then_status() {
        assert_eq!(
            parse_error_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(
            parse_error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
    }

    #[test]
    fn session_expiry_prefers_absolute_timestamp() {
        let now = Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap();
        let token: TokenResponse = serde_json::from_value(serde_json::json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1766228400,
            "refresh_token": "r1",
            "user": { "id": "00000000-0000-0000-0000-00000000000a", "email": "a@b.c" }
        }))
        .unwrap();

        let session = token.into_session(now);

        assert_eq!(session.expires_at, DateTime::from_timestamp(1766228400, 0));
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        assert_eq!(session.user.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn session_expiry_from_relative_seconds() {
        let now = Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap();
        let token: TokenResponse = serde_json::from_value(serde_json::json!({
            "access_token": "jwt",
            "expires_in": 60,
            "user": { "id": "00000000-0000-0000-0000-00000000000a" }
        }))
        .unwrap();

        let session = token.into_session(now);

        assert_eq!(session.expires_at, Some(now + Duration::seconds(60)));
        assert_eq!(session.refresh_token, None);
    }

    #[test]
    fn sign_up_response_distinguishes_pending_confirmation() {
        let pending: SignUpResponse = serde_json::from_value(serde_json::json!({
            "id": "00000000-0000-0000-0000-00000000000b",
            "aud": "authenticated",
            "email": "new@pineat.app",
            "confirmation_sent_at": "2025-12-20T10:00:00Z"
        }))
        .unwrap();
        assert!(matches!(pending, SignUpResponse::User(_)));

        let confirmed: SignUpResponse = serde_json::from_value(serde_json::json!({
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r",
            "user": { "id": "00000000-0000-0000-0000-00000000000b" }
        }))
        .unwrap();
        assert!(matches!(confirmed, SignUpResponse::Session(_)));
    }
}
