//! Error types for presigned URL verification.
//!
//! [`AuthError`] has one variant per verification gate. The variants are
//! deliberately coarse: a signature mismatch never reveals whether the path,
//! the method, or the secret was wrong.

/// Errors returned by [`Verifier::verify`](crate::verifier::Verifier::verify).
///
/// Variants are listed in the order the verifier checks for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// A required query parameter is absent or empty, or `X-Stowry-Date` /
    /// `X-Stowry-Expires` is not a base-10 integer.
    #[error("missing required signature parameters")]
    MissingParams,

    /// The access key was not recognized by the credential provider.
    #[error("invalid credential")]
    InvalidCredential,

    /// The current time is past `X-Stowry-Date + X-Stowry-Expires`.
    #[error("signature expired")]
    Expired,

    /// The supplied signature does not match the recomputed one.
    #[error("invalid signature")]
    InvalidSignature,
}
