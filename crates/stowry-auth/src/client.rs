//! Presigned URL issuance.
//!
//! A [`Client`] holds an endpoint, an access key ID and its secret, and mints
//! presigned URLs of the form:
//!
//! ```text
//! {endpoint}{path}?X-Stowry-Credential={access_key}
//!     &X-Stowry-Date={timestamp}
//!     &X-Stowry-Expires={expires}
//!     &X-Stowry-Signature={signature}
//! ```
//!
//! Query parameters are emitted in alphabetical order. Issuance never fails:
//! bad inputs simply yield URLs that do not verify.

use std::fmt;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::signature::{
    CREDENTIAL_PARAM, DATE_PARAM, DEFAULT_EXPIRES, EXPIRES_PARAM, MAX_EXPIRES, SIGNATURE_PARAM,
    sign,
};

/// Generates presigned URLs for a Stowry server.
///
/// A `Client` is immutable after construction and safe to share across threads.
///
/// # Examples
///
/// ```
/// use stowry_auth::Client;
///
/// let client = Client::new(
///     "https://storage.example.com/",
///     "FE373CEF5632FDED3081",
///     "9218d0ddfdb1779169f4b6b3b36df321099e98e9",
/// );
///
/// let url = client.presign_get("/bucket/object.pdf", 900);
/// assert!(url.starts_with("https://storage.example.com/bucket/object.pdf?X-Stowry-Credential="));
/// ```
#[derive(Clone)]
pub struct Client {
    endpoint: String,
    access_key: String,
    secret_key: Vec<u8>,
    clock: Arc<dyn Clock>,
}

impl Client {
    /// Create a client for the server at `endpoint`.
    ///
    /// A single trailing `/` on the endpoint is removed.
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<Vec<u8>>,
    ) -> Self {
        let mut endpoint = endpoint.into();
        if endpoint.ends_with('/') {
            endpoint.pop();
        }

        Self {
            endpoint,
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used to stamp issued URLs.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The endpoint URLs are issued against, without a trailing slash.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The access key ID embedded in issued URLs.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Presigned URL for downloading the object at `path`.
    ///
    /// `expires` is the validity period in seconds. Values `<= 0` fall back to
    /// [`DEFAULT_EXPIRES`]; values above [`MAX_EXPIRES`] are capped.
    #[must_use]
    pub fn presign_get(&self, path: &str, expires: i64) -> String {
        self.presign("GET", path, expires)
    }

    /// Presigned URL for uploading an object to `path`.
    ///
    /// See [`Client::presign_get`] for how `expires` is interpreted.
    #[must_use]
    pub fn presign_put(&self, path: &str, expires: i64) -> String {
        self.presign("PUT", path, expires)
    }

    /// Presigned URL for deleting the object at `path`.
    ///
    /// See [`Client::presign_get`] for how `expires` is interpreted.
    #[must_use]
    pub fn presign_delete(&self, path: &str, expires: i64) -> String {
        self.presign("DELETE", path, expires)
    }

    /// Presigned URL for an arbitrary HTTP method.
    #[must_use]
    pub fn presign(&self, method: &str, path: &str, expires: i64) -> String {
        let path = normalize_path(path);
        let expires = effective_expires(expires);
        let timestamp = self.clock.now_unix();
        let signature = sign(&self.secret_key, method, &path, timestamp, expires);

        format!(
            "{endpoint}{path}?{CREDENTIAL_PARAM}={access_key}&{DATE_PARAM}={timestamp}\
             &{EXPIRES_PARAM}={expires}&{SIGNATURE_PARAM}={signature}",
            endpoint = self.endpoint,
            access_key = self.access_key,
        )
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"...")
            .finish_non_exhaustive()
    }
}

/// Prefix `path` with `/` unless it already starts with one.
fn normalize_path(path: &str) -> std::borrow::Cow<'_, str> {
    if path.starts_with('/') {
        std::borrow::Cow::Borrowed(path)
    } else {
        std::borrow::Cow::Owned(format!("/{path}"))
    }
}

/// Clamp the requested validity period to `1..=MAX_EXPIRES`.
fn effective_expires(expires: i64) -> i64 {
    if expires <= 0 {
        DEFAULT_EXPIRES
    } else {
        expires.min(MAX_EXPIRES)
    }
}
