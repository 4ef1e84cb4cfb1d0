//! Object operations behind the authentication gate.
//!
//! Once a presigned URL has been verified, [`dispatch_object`] routes the
//! request to an [`ObjectHandler`] by HTTP method. [`MemoryObjectStore`] is a
//! `DashMap`-backed handler used by the server binary and by tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use crate::body::StowryBody;
use crate::error::HttpError;
use crate::response::{empty_response, object_response};

/// Boxed future returned by [`ObjectHandler`] methods.
pub type HandlerFuture =
    Pin<Box<dyn Future<Output = Result<http::Response<StowryBody>, HttpError>> + Send>>;

/// Storage backend invoked for authorized requests.
///
/// Methods return boxed futures so the handler can be used behind
/// `Arc<dyn ObjectHandler>`.
pub trait ObjectHandler: Send + Sync + 'static {
    /// Return the object stored at `path`.
    fn get_object(&self, path: String) -> HandlerFuture;

    /// Store `body` at `path`, replacing any existing object.
    fn put_object(&self, path: String, body: Bytes) -> HandlerFuture;

    /// Remove the object at `path`.
    fn delete_object(&self, path: String) -> HandlerFuture;
}

/// Route an authorized request to the handler method matching its HTTP method.
pub async fn dispatch_object<H: ObjectHandler + ?Sized>(
    handler: &H,
    method: &http::Method,
    path: &str,
    body: Bytes,
) -> Result<http::Response<StowryBody>, HttpError> {
    debug!(%method, path, "dispatching object operation");

    if *method == http::Method::GET {
        handler.get_object(path.to_owned()).await
    } else if *method == http::Method::PUT {
        handler.put_object(path.to_owned(), body).await
    } else if *method == http::Method::DELETE {
        handler.delete_object(path.to_owned()).await
    } else {
        Err(HttpError::MethodNotAllowed(method.to_string()))
    }
}

/// In-memory object store keyed by request path.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<DashMap<String, Bytes>>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectHandler for MemoryObjectStore {
    fn get_object(&self, path: String) -> HandlerFuture {
        let found = self.objects.get(&path).map(|entry| entry.value().clone());
        Box::pin(async move {
            match found {
                Some(data) => Ok(object_response(data)),
                None => Err(HttpError::NotFound(path)),
            }
        })
    }

    fn put_object(&self, path: String, body: Bytes) -> HandlerFuture {
        debug!(path = %path, size = body.len(), "storing object");
        self.objects.insert(path, body);
        Box::pin(async { Ok(empty_response(http::StatusCode::OK)) })
    }

    fn delete_object(&self, path: String) -> HandlerFuture {
        // Deleting a missing object is not an error.
        self.objects.remove(&path);
        Box::pin(async { Ok(empty_response(http::StatusCode::NO_CONTENT)) })
    }
}
