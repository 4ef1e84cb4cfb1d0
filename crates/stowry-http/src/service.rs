//! The Stowry HTTP service implementing hyper's `Service` trait.
//!
//! [`StowryHttpService`] runs every request through:
//!
//! 1. Health check interception (`GET /health`, `GET /_health`)
//! 2. Presigned URL verification (unless disabled)
//! 3. Request body collection
//! 4. Dispatch to the [`ObjectHandler`]
//! 5. Common response headers (`x-stowry-request-id`, `Server`)

use std::borrow::Cow;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::Service;
use percent_encoding::percent_decode_str;
use stowry_auth::{StaticCredentialProvider, Verifier};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::body::StowryBody;
use crate::error::HttpError;
use crate::handler::{ObjectHandler, dispatch_object};
use crate::response::error_to_response;

/// Configuration for the Stowry HTTP service.
#[derive(Debug, Clone)]
pub struct StowryHttpConfig {
    /// Verifier applied to every non-health request.
    pub verifier: Verifier,
    /// Whether to skip presigned URL verification (useful for development).
    pub skip_signature_validation: bool,
}

impl Default for StowryHttpConfig {
    /// A configuration with no known credentials: every request is rejected.
    fn default() -> Self {
        Self {
            verifier: Verifier::new(StaticCredentialProvider::default()),
            skip_signature_validation: false,
        }
    }
}

/// The Stowry HTTP service that implements hyper's `Service` trait.
///
/// # Type Parameters
///
/// - `H`: The storage backend implementing [`ObjectHandler`].
#[derive(Debug)]
pub struct StowryHttpService<H: ObjectHandler> {
    handler: Arc<H>,
    config: Arc<StowryHttpConfig>,
}

impl<H: ObjectHandler> StowryHttpService<H> {
    /// Create a new service with the given handler and configuration.
    #[must_use]
    pub fn new(handler: H, config: StowryHttpConfig) -> Self {
        Self::from_shared(Arc::new(handler), config)
    }

    /// Create a new service from an `Arc<H>` handler and configuration.
    #[must_use]
    pub fn from_shared(handler: Arc<H>, config: StowryHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
        }
    }
}

impl<H: ObjectHandler> Clone for StowryHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: ObjectHandler> Service<http::Request<Incoming>> for StowryHttpService<H> {
    type Response = http::Response<StowryBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();
            let (parts, incoming) = req.into_parts();

            let response = match authorize(&parts, &config, &request_id) {
                Some(response) => response,
                None => match collect_body(incoming).await {
                    Ok(body) => {
                        process_request(&parts, body, handler.as_ref(), &request_id).await
                    }
                    Err(err) => {
                        warn!(error = %err, request_id = %request_id, "failed to collect request body");
                        error_to_response(&HttpError::BodyRead, &request_id)
                    }
                },
            };

            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Short-circuit health checks and unauthorized requests.
///
/// Returns `None` when the request should proceed to the handler.
fn authorize(
    parts: &http::request::Parts,
    config: &StowryHttpConfig,
    request_id: &str,
) -> Option<http::Response<StowryBody>> {
    if is_health_check(&parts.method, parts.uri.path()) {
        return Some(health_check_response());
    }

    if config.skip_signature_validation {
        return None;
    }

    match check_presigned(parts, &config.verifier) {
        Ok(()) => None,
        Err(err) => {
            warn!(
                method = %parts.method,
                path = parts.uri.path(),
                error = %err,
                request_id,
                "presigned URL rejected"
            );
            Some(error_to_response(&err, request_id))
        }
    }
}

/// Verify the presigned parameters of a request against its method and path.
///
/// The signature covers the decoded path, so `/files/my%20report.txt` on the
/// wire verifies against a URL issued for `/files/my report.txt`.
pub fn check_presigned(
    parts: &http::request::Parts,
    verifier: &Verifier,
) -> Result<(), HttpError> {
    let path = object_path(&parts.uri);
    let query = parts.uri.query().unwrap_or("");
    verifier.verify_query(parts.method.as_str(), &path, query)?;
    debug!(method = %parts.method, path = %path, "presigned URL accepted");
    Ok(())
}

/// Percent-decode the request path.
///
/// Invalid UTF-8 sequences are replaced, which can never match a signed path.
#[must_use]
pub fn object_path(uri: &http::Uri) -> Cow<'_, str> {
    percent_decode_str(uri.path()).decode_utf8_lossy()
}

/// Dispatch an authorized request and render handler errors.
async fn process_request<H: ObjectHandler>(
    parts: &http::request::Parts,
    body: Bytes,
    handler: &H,
    request_id: &str,
) -> http::Response<StowryBody> {
    let method = &parts.method;
    let path = object_path(&parts.uri);

    match dispatch_object(handler, method, &path, body).await {
        Ok(response) => {
            info!(
                %method,
                path = %path,
                status = %response.status(),
                request_id,
                "served request"
            );
            response
        }
        Err(err) => {
            debug!(%method, path = %path, error = %err, request_id, "object operation failed");
            error_to_response(&err, request_id)
        }
    }
}

/// Collect the full body from a hyper `Incoming` stream into `Bytes`.
async fn collect_body(incoming: Incoming) -> Result<Bytes, hyper::Error> {
    let collected = incoming.collect().await?;
    Ok(collected.to_bytes())
}

/// Body served on the health endpoints.
pub const HEALTH_RESPONSE: &str = r#"{"status":"running","service":"stowry"}"#;

/// Check if the request is a health check probe.
fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && (path == "/health" || path == "/_health")
}

/// Produce a health check response.
fn health_check_response() -> http::Response<StowryBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(StowryBody::from(HEALTH_RESPONSE))
        .expect("static health response should be valid")
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<StowryBody>,
    request_id: &str,
) -> http::Response<StowryBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert("x-stowry-request-id", hv);
    }

    headers.insert("Server", http::header::HeaderValue::from_static("Stowry"));

    response
}
