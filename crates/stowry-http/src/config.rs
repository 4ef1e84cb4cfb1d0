//! Stowry server configuration.
//!
//! Provides [`StowryConfig`], loaded from environment variables by
//! [`StowryConfig::from_env`] and shared by the server and presign binaries.

use serde::{Deserialize, Serialize};
use stowry_auth::StaticCredentialProvider;
use typed_builder::TypedBuilder;

/// Stowry configuration.
///
/// # Examples
///
/// ```
/// use stowry_http::config::StowryConfig;
///
/// let config = StowryConfig::default();
/// assert_eq!(config.listen, "0.0.0.0:5708");
/// assert!(!config.skip_signature_validation);
/// ```
#[derive(Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct StowryConfig {
    /// Bind address for the server (e.g. `"0.0.0.0:5708"`).
    #[builder(default = String::from("0.0.0.0:5708"))]
    pub listen: String,

    /// Public base URL presigned URLs are issued against.
    #[builder(default = String::from("http://localhost:5708"))]
    pub endpoint: String,

    /// Access key ID of the single configured credential.
    #[builder(default, setter(strip_option))]
    pub access_key: Option<String>,

    /// Secret key of the single configured credential.
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,

    /// Whether to let every request through without checking its signature.
    #[builder(default = false)]
    pub skip_signature_validation: bool,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for StowryConfig {
    fn default() -> Self {
        Self {
            listen: String::from("0.0.0.0:5708"),
            endpoint: String::from("http://localhost:5708"),
            access_key: None,
            secret_key: None,
            skip_signature_validation: false,
            log_level: String::from("info"),
        }
    }
}

impl std::fmt::Debug for StowryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StowryConfig")
            .field("listen", &self.listen)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "..."))
            .field("skip_signature_validation", &self.skip_signature_validation)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl StowryConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `STOWRY_LISTEN` | `0.0.0.0:5708` |
    /// | `STOWRY_ENDPOINT` | `http://localhost:5708` |
    /// | `STOWRY_ACCESS_KEY` | *(unset)* |
    /// | `STOWRY_SECRET_KEY` | *(unset)* |
    /// | `STOWRY_SKIP_SIGNATURE_VALIDATION` | `false` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("STOWRY_LISTEN") {
            config.listen = v;
        }
        if let Some(v) = lookup("STOWRY_ENDPOINT") {
            config.endpoint = v;
        }
        if let Some(v) = lookup("STOWRY_ACCESS_KEY") {
            config.access_key = Some(v);
        }
        if let Some(v) = lookup("STOWRY_SECRET_KEY") {
            config.secret_key = Some(v);
        }
        if let Some(v) = lookup("STOWRY_SKIP_SIGNATURE_VALIDATION") {
            config.skip_signature_validation = parse_bool(&v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// The configured (access key, secret key) pair, if both are set and non-empty.
    #[must_use]
    pub fn credential(&self) -> Option<(&str, &str)> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(ak), Some(sk)) if !ak.is_empty() && !sk.is_empty() => Some((ak, sk)),
            _ => None,
        }
    }

    /// Build a credential provider holding the configured credential.
    ///
    /// The provider is empty when no credential is configured, so every
    /// presigned URL is rejected as an invalid credential.
    #[must_use]
    pub fn credential_provider(&self) -> StaticCredentialProvider {
        StaticCredentialProvider::new(
            self.credential()
                .map(|(ak, sk)| (ak.to_owned(), sk.to_owned())),
        )
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
