//! Stowry presigned URL signing and verification.
//!
//! A Stowry presigned URL grants bearer access to a single path, for a single
//! HTTP method, for a bounded time window. It carries four query parameters:
//!
//! - `X-Stowry-Credential` - access key ID
//! - `X-Stowry-Date` - Unix timestamp in seconds
//! - `X-Stowry-Expires` - validity period in seconds (1 to 604800)
//! - `X-Stowry-Signature` - hex-encoded HMAC-SHA256 signature
//!
//! The signature is computed over:
//!
//! ```text
//! {METHOD}\n{PATH}\n{TIMESTAMP}\n{EXPIRES}
//! ```
//!
//! # Usage
//!
//! ```rust
//! use stowry_auth::{Client, StaticCredentialProvider, Verifier};
//!
//! let client = Client::new(
//!     "https://storage.example.com",
//!     "FE373CEF5632FDED3081",
//!     "9218d0ddfdb1779169f4b6b3b36df321099e98e9",
//! );
//! let url = client.presign_get("/bucket/object.pdf", 900);
//!
//! let verifier = Verifier::new(StaticCredentialProvider::new(vec![(
//!     "FE373CEF5632FDED3081".to_owned(),
//!     "9218d0ddfdb1779169f4b6b3b36df321099e98e9".to_owned(),
//! )]));
//! let (_, query) = url.split_once('?').unwrap();
//! assert!(verifier.verify_query("GET", "/bucket/object.pdf", query).is_ok());
//! ```
//!
//! # Modules
//!
//! - [`client`] - Presigned URL issuance
//! - [`clock`] - Time sources
//! - [`credentials`] - Credential provider trait and in-memory implementation
//! - [`error`] - Verification error type
//! - [`signature`] - Canonical message and HMAC-SHA256 signature
//! - [`verifier`] - Presigned URL verification

pub mod client;
pub mod clock;
pub mod credentials;
pub mod error;
pub mod signature;
pub mod verifier;

pub use client::Client;
pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{CredentialProvider, StaticCredentialProvider};
pub use error::AuthError;
pub use signature::{
    CREDENTIAL_PARAM, DATE_PARAM, DEFAULT_EXPIRES, EXPIRES_PARAM, MAX_EXPIRES, SIGNATURE_PARAM,
    sign,
};
pub use verifier::{PresignedParams, Verifier};
