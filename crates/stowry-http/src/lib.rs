//! HTTP layer for serving objects behind Stowry presigned URLs.
//!
//! - **Service** ([`service`]): [`StowryHttpService`](service::StowryHttpService)
//!   implements hyper's `Service` trait, verifying presigned URLs before
//!   dispatching to an object handler.
//! - **Handlers** ([`handler`]): the [`ObjectHandler`](handler::ObjectHandler)
//!   trait and an in-memory implementation.
//! - **Errors** ([`error`]) and **responses** ([`response`]): status code
//!   mapping and JSON error documents.
//! - **Config** ([`config`]): environment-driven server configuration.
//! - **Server** ([`server`]): the accept loop with graceful shutdown.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> StowryHttpService (hyper Service)
//!     -> Health check interception
//!     -> Presigned URL verification (stowry-auth Verifier)
//!     -> Body collection
//!     -> dispatch_object (ObjectHandler trait)
//!     -> Common response headers (x-stowry-request-id, Server)
//!   <- HTTP Response
//! ```
//!
//! Verification failures map to status codes as follows:
//!
//! | Error | Status |
//! |-------|--------|
//! | `MissingParams` | 400 |
//! | `InvalidCredential` | 403 |
//! | `Expired` | 403 |
//! | `InvalidSignature` | 403 |

pub mod body;
pub mod config;
pub mod error;
pub mod handler;
pub mod response;
pub mod server;
pub mod service;

pub use body::StowryBody;
pub use config::StowryConfig;
pub use error::HttpError;
pub use handler::{MemoryObjectStore, ObjectHandler};
pub use server::serve;
pub use service::{StowryHttpConfig, StowryHttpService};
