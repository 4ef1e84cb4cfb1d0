//! Credential provider trait and implementations.
//!
//! The [`Verifier`](crate::verifier::Verifier) never knows where secrets live.
//! It asks a [`CredentialProvider`] to resolve an access key ID, and treats a
//! `None` answer as an unknown credential.

use std::collections::HashMap;
use std::fmt;

/// Trait for looking up secret keys by access key ID.
///
/// Implementations may back this with a database, configuration file, or any
/// other store. The call is synchronous and may block; the verifier adds no
/// caching, retries, or timeouts around it.
///
/// Any `Fn(&str) -> Option<String>` closure is a provider:
///
/// ```
/// use stowry_auth::credentials::CredentialProvider;
///
/// let lookup = |access_key: &str| (access_key == "AKID").then(|| "secret".to_owned());
/// assert_eq!(lookup.secret_key("AKID").as_deref(), Some("secret"));
/// assert!(lookup.secret_key("other").is_none());
/// ```
pub trait CredentialProvider: Send + Sync {
    /// Retrieve the secret key for the given access key ID, or `None` if the
    /// access key is not recognized.
    fn secret_key(&self, access_key_id: &str) -> Option<String>;
}

impl<F> CredentialProvider for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn secret_key(&self, access_key_id: &str) -> Option<String> {
        self(access_key_id)
    }
}

/// A simple in-memory credential provider backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use stowry_auth::credentials::{CredentialProvider, StaticCredentialProvider};
///
/// let provider = StaticCredentialProvider::new(vec![(
///     "FE373CEF5632FDED3081".to_owned(),
///     "9218d0ddfdb1779169f4b6b3b36df321099e98e9".to_owned(),
/// )]);
///
/// let secret = provider.secret_key("FE373CEF5632FDED3081");
/// assert_eq!(secret.as_deref(), Some("9218d0ddfdb1779169f4b6b3b36df321099e98e9"));
/// ```
#[derive(Clone, Default)]
pub struct StaticCredentialProvider {
    credentials: HashMap<String, String>,
}

impl StaticCredentialProvider {
    /// Create a provider from (access_key_id, secret_key) pairs.
    pub fn new(credentials: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            credentials: credentials.into_iter().collect(),
        }
    }

    /// Number of configured access keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether no access keys are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl fmt::Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets stay out of logs.
        f.debug_struct("StaticCredentialProvider")
            .field("access_keys", &self.credentials.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn secret_key(&self, access_key_id: &str) -> Option<String> {
        self.credentials.get(access_key_id).cloned()
    }
}
