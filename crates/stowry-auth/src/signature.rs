//! Stowry signature computation.
//!
//! A Stowry signature is the hex-encoded HMAC-SHA256 of a four-line string:
//!
//! ```text
//! {METHOD}\n{PATH}\n{TIMESTAMP}\n{EXPIRES}
//! ```
//!
//! The same function is used by the [`Client`](crate::client::Client) when
//! issuing URLs and by the [`Verifier`](crate::verifier::Verifier) when
//! re-deriving the expected value.

use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default validity period in seconds (15 minutes).
pub const DEFAULT_EXPIRES: i64 = 900;

/// Maximum validity period in seconds (7 days).
pub const MAX_EXPIRES: i64 = 604_800;

/// Query parameter carrying the access key ID.
pub const CREDENTIAL_PARAM: &str = "X-Stowry-Credential";

/// Query parameter carrying the Unix timestamp of issuance.
pub const DATE_PARAM: &str = "X-Stowry-Date";

/// Query parameter carrying the validity period in seconds.
pub const EXPIRES_PARAM: &str = "X-Stowry-Expires";

/// Query parameter carrying the hex-encoded signature.
pub const SIGNATURE_PARAM: &str = "X-Stowry-Signature";

/// Build the canonical string that gets signed.
///
/// # Examples
///
/// ```
/// use stowry_auth::signature::string_to_sign;
///
/// let sts = string_to_sign("GET", "/test/hello.txt", 1_736_956_800, 900);
/// assert_eq!(sts, "GET\n/test/hello.txt\n1736956800\n900");
/// ```
#[must_use]
pub fn string_to_sign(method: &str, path: &str, timestamp: i64, expires: i64) -> String {
    format!("{method}\n{path}\n{timestamp}\n{expires}")
}

/// Compute the Stowry signature for a request.
///
/// Inputs are not validated: negative timestamps, empty keys and
/// unnormalized paths are all signed as given.
///
/// # Examples
///
/// ```
/// use stowry_auth::signature::sign;
///
/// let signature = sign(
///     b"9218d0ddfdb1779169f4b6b3b36df321099e98e9",
///     "GET",
///     "/test/hello.txt",
///     1_736_956_800,
///     900,
/// );
/// assert_eq!(
///     signature,
///     "b24285352583edb3d06c531f61e38c5706d42d79e31474bf1f95667d524bae21"
/// );
/// ```
#[must_use]
pub fn sign(secret_key: &[u8], method: &str, path: &str, timestamp: i64, expires: i64) -> String {
    let message = string_to_sign(method, path, timestamp, expires);
    let mut mac =
        HmacSha256::new_from_slice(secret_key).expect("HMAC can accept keys of any length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
