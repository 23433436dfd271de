//! Client configuration.
//!
//! Loaded from the environment (and a `.env` file when present) or built in code.

use std::time::Duration;

use url::Url;

/// Default table holding location rows.
pub const DEFAULT_LOCATIONS_TABLE: &str = "locations";

/// Default storage bucket for photos.
pub const DEFAULT_IMAGES_BUCKET: &str = "images";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`.
    pub supabase_url: Url,
    /// Public (anon) API key sent as `apikey` on every request.
    pub anon_key: String,
    pub locations_table: String,
    pub images_bucket: String,
    /// No timeout unless set.
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),
    #[error("Invalid URL in {key}: {message}")]
    InvalidUrl { key: &'static str, message: String },
    #[error("Invalid number in {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ClientConfig {
    pub fn new(supabase_url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            supabase_url: parse_base_url("SUPABASE_URL", supabase_url)?,
            anon_key: anon_key.into(),
            locations_table: DEFAULT_LOCATIONS_TABLE.to_string(),
            images_bucket: DEFAULT_IMAGES_BUCKET.to_string(),
            request_timeout: None,
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Load from process environment.
    ///
    /// Reads `SUPABASE_URL`, `SUPABASE_ANON_KEY`, and the optional
    /// `PINEAT_LOCATIONS_TABLE`, `PINEAT_IMAGES_BUCKET`,
    /// `PINEAT_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let anon_key = lookup("SUPABASE_ANON_KEY")
            .or_else(|| lookup("SUPABASE_KEY"))
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        let mut config = Self::new(&url, anon_key)?;

        if let Some(table) = lookup("PINEAT_LOCATIONS_TABLE").filter(|t| !t.is_empty()) {
            config.locations_table = table;
        }
        if let Some(bucket) = lookup("PINEAT_IMAGES_BUCKET").filter(|b| !b.is_empty()) {
            config.images_bucket = bucket;
        }
        if let Some(raw) = lookup("PINEAT_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "PINEAT_REQUEST_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.supabase_url.as_str().trim_end_matches('/')
    }
}

fn parse_base_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        key,
        message: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            key,
            message: format!("unsupported scheme {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_keys_set() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.base_url(), "https://demo.supabase.co");
        assert_eq!(config.anon_key, "anon");
        assert_eq!(config.locations_table, "locations");
        assert_eq!(config.images_bucket, "images");
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn optional_keys_override_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "http://localhost:54321"),
            ("SUPABASE_KEY", "legacy-key"),
            ("PINEAT_LOCATIONS_TABLE", "pins"),
            ("PINEAT_IMAGES_BUCKET", "photos"),
            ("PINEAT_REQUEST_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.anon_key, "legacy-key");
        assert_eq!(config.locations_table, "pins");
        assert_eq!(config.images_bucket, "photos");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn missing_url_is_reported() {
        let err = ClientConfig::from_lookup(lookup(&[("SUPABASE_ANON_KEY", "anon")])).unwrap_err();

        assert_eq!(err, ConfigError::Missing("SUPABASE_URL"));
    }

    #[test]
    fn rejects_non_http_url() {
        let err = ClientConfig::new("ftp://demo.supabase.co", "anon").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidUrl { key: "SUPABASE_URL", .. }));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("PINEAT_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }
}
