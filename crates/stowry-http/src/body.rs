//! Response body type for the Stowry HTTP service.
//!
//! Every response is fully buffered: object contents, JSON documents, or
//! nothing at all for 204 responses.

use bytes::Bytes;
use http_body_util::Full;

/// Body of every Stowry response.
pub type StowryBody = Full<Bytes>;

/// Serialize `value` into a JSON body.
#[must_use]
pub fn json_body(value: &serde_json::Value) -> StowryBody {
    Full::new(Bytes::from(value.to_string()))
}

/// A body with no content.
#[must_use]
pub fn empty_body() -> StowryBody {
    Full::new(Bytes::new())
}
