//! HTTP-level errors and their status code mapping.

use stowry_auth::AuthError;

/// Errors surfaced to clients of the Stowry HTTP service.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Presigned URL verification failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// No object is stored at the requested path.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The HTTP method has no object operation.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The request body could not be read.
    #[error("failed to read request body")]
    BodyRead,
}

impl HttpError {
    /// HTTP status for this error.
    ///
    /// Malformed presigned parameters are a client error (400); every other
    /// verification failure is reported as 403 without further detail.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::Auth(AuthError::MissingParams) | Self::BodyRead => {
                http::StatusCode::BAD_REQUEST
            }
            Self::Auth(
                AuthError::InvalidCredential | AuthError::Expired | AuthError::InvalidSignature,
            ) => http::StatusCode::FORBIDDEN,
            Self::NotFound(_) => http::StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => http::StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(AuthError::MissingParams) => "MissingParams",
            Self::Auth(AuthError::InvalidCredential) => "InvalidCredential",
            Self::Auth(AuthError::Expired) => "Expired",
            Self::Auth(AuthError::InvalidSignature) => "InvalidSignature",
            Self::NotFound(_) => "NotFound",
            Self::MethodNotAllowed(_) => "MethodNotAllowed",
            Self::BodyRead => "BadRequest",
        }
    }
}
