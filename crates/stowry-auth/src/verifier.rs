//! Presigned URL verification.
//!
//! [`Verifier::verify`] runs five ordered gates and stops at the first one
//! that fails:
//!
//! 1. all four `X-Stowry-*` parameters present and non-empty ([`AuthError::MissingParams`])
//! 2. access key resolves to a secret ([`AuthError::InvalidCredential`])
//! 3. date and expires parse as `i64` ([`AuthError::MissingParams`])
//! 4. `now <= date + expires` ([`AuthError::Expired`])
//! 5. constant-time signature match ([`AuthError::InvalidSignature`])
//!
//! There is no lower bound on the timestamp: a URL dated in the future is
//! accepted for as long as its window has not closed.

use std::fmt;
use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::clock::{Clock, SystemClock};
use crate::credentials::CredentialProvider;
use crate::error::AuthError;
use crate::signature::{CREDENTIAL_PARAM, DATE_PARAM, EXPIRES_PARAM, SIGNATURE_PARAM, sign};

/// The four Stowry parameters pulled out of a query, before any validation.
///
/// When a parameter repeats, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresignedParams {
    /// Value of `X-Stowry-Credential`.
    pub credential: Option<String>,
    /// Value of `X-Stowry-Date`.
    pub date: Option<String>,
    /// Value of `X-Stowry-Expires`.
    pub expires: Option<String>,
    /// Value of `X-Stowry-Signature`.
    pub signature: Option<String>,
}

impl PresignedParams {
    /// Collect the Stowry parameters from decoded key/value pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowry_auth::verifier::PresignedParams;
    ///
    /// let params = PresignedParams::from_pairs([
    ///     ("X-Stowry-Credential", "a"),
    ///     ("X-Stowry-Credential", "b"),
    ///     ("unrelated", "x"),
    /// ]);
    /// assert_eq!(params.credential.as_deref(), Some("a"));
    /// assert!(params.date.is_none());
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                CREDENTIAL_PARAM => &mut params.credential,
                DATE_PARAM => &mut params.date,
                EXPIRES_PARAM => &mut params.expires,
                SIGNATURE_PARAM => &mut params.signature,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.as_ref().to_owned());
            }
        }
        params
    }

    /// Decode a raw `application/x-www-form-urlencoded` query string.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }
}

/// Validates Stowry presigned URL signatures.
///
/// A `Verifier` is immutable after construction and safe to share across
/// threads.
///
/// # Examples
///
/// ```
/// use stowry_auth::{AuthError, Client, Verifier};
///
/// let verifier = Verifier::new(|access_key: &str| {
///     (access_key == "FE373CEF5632FDED3081")
///         .then(|| "9218d0ddfdb1779169f4b6b3b36df321099e98e9".to_owned())
/// });
///
/// let client = Client::new(
///     "http://localhost:5708",
///     "FE373CEF5632FDED3081",
///     "9218d0ddfdb1779169f4b6b3b36df321099e98e9",
/// );
/// let url = client.presign_get("/files/test.txt", 900);
/// let (_, query) = url.split_once('?').unwrap();
///
/// assert_eq!(verifier.verify_query("GET", "/files/test.txt", query), Ok(()));
/// assert_eq!(
///     verifier.verify_query("PUT", "/files/test.txt", query),
///     Err(AuthError::InvalidSignature)
/// );
/// ```
#[derive(Clone)]
pub struct Verifier {
    credential_provider: Arc<dyn CredentialProvider>,
    clock: Arc<dyn Clock>,
}

impl Verifier {
    /// Create a verifier resolving access keys through `credential_provider`.
    pub fn new(credential_provider: impl CredentialProvider + 'static) -> Self {
        Self::from_shared(Arc::new(credential_provider))
    }

    /// Create a verifier from an already shared credential provider.
    #[must_use]
    pub fn from_shared(credential_provider: Arc<dyn CredentialProvider>) -> Self {
        Self {
            credential_provider,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used for the expiry check.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Verify a request given its decoded query parameters.
    ///
    /// `method` and `path` must be the ones the URL was issued for, exactly as
    /// they were signed (e.g. `"GET"`, `"/bucket/file.txt"`).
    pub fn verify<I, K, V>(&self, method: &str, path: &str, query: I) -> Result<(), AuthError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.verify_params(method, path, &PresignedParams::from_pairs(query))
    }

    /// Verify a request given its raw, still percent-encoded query string.
    pub fn verify_query(&self, method: &str, path: &str, query: &str) -> Result<(), AuthError> {
        self.verify_params(method, path, &PresignedParams::from_query(query))
    }

    /// Verify a request given already extracted Stowry parameters.
    pub fn verify_params(
        &self,
        method: &str,
        path: &str,
        params: &PresignedParams,
    ) -> Result<(), AuthError> {
        let credential = required(params.credential.as_deref())?;
        let date = required(params.date.as_deref())?;
        let expires = required(params.expires.as_deref())?;
        let signature = required(params.signature.as_deref())?;

        let secret_key = self
            .credential_provider
            .secret_key(credential)
            .ok_or(AuthError::InvalidCredential)?;

        let timestamp: i64 = date.parse().map_err(|_| AuthError::MissingParams)?;
        let expires: i64 = expires.parse().map_err(|_| AuthError::MissingParams)?;

        let now = self.clock.now_unix();
        if now > timestamp.saturating_add(expires) {
            return Err(AuthError::Expired);
        }

        let expected = sign(secret_key.as_bytes(), method, path, timestamp, expires);
        if expected.as_bytes().ct_eq(signature.as_bytes()).into() {
            Ok(())
        } else {
            Err(AuthError::InvalidSignature)
        }
    }
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("credential_provider", &"...")
            .finish_non_exhaustive()
    }
}

/// Treat an absent or empty parameter as missing.
fn required(value: Option<&str>) -> Result<&str, AuthError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingParams)
}
