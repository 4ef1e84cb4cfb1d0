//! End-to-end tests for the Stowry server.
//!
//! Each test starts its own in-process server on an ephemeral port, backed
//! by a fresh [`MemoryObjectStore`], and talks to it over real HTTP.
//!
//! ```text
//! cargo test -p stowry-integration
//! ```

use std::net::SocketAddr;
use std::sync::Once;

use anyhow::Result;
use stowry_auth::{Client, StaticCredentialProvider, Verifier};
use stowry_http::{MemoryObjectStore, StowryHttpConfig, StowryHttpService};
use tokio::net::TcpListener;

/// Access key accepted by test servers.
pub const TEST_ACCESS_KEY: &str = "FE373CEF5632FDED3081";
/// Secret key for [`TEST_ACCESS_KEY`].
pub const TEST_SECRET_KEY: &str = "9218d0ddfdb1779169f4b6b3b36df321099e98e9";

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A server running in the background of the current test runtime.
#[derive(Debug)]
pub struct TestServer {
    /// Address the server is listening on.
    pub addr: SocketAddr,
    /// Client issuing URLs against [`TestServer::addr`] with the test credential.
    pub client: Client,
    /// HTTP client for sending requests.
    pub http: reqwest::Client,
}

impl TestServer {
    /// A client for the same server signing with an unknown credential.
    #[must_use]
    pub fn stranger(&self) -> Client {
        Client::new(self.client.endpoint(), "UNKNOWNACCESSKEY0000", TEST_SECRET_KEY)
    }

    /// Plain URL for `path` without any presigned parameters.
    #[must_use]
    pub fn unsigned_url(&self, path: &str) -> String {
        format!("{}{path}", self.client.endpoint())
    }
}

/// Start a server that only accepts the test credential.
pub async fn start_server() -> Result<TestServer> {
    let verifier = Verifier::new(StaticCredentialProvider::new(vec![(
        TEST_ACCESS_KEY.to_owned(),
        TEST_SECRET_KEY.to_owned(),
    )]));
    start_server_with(StowryHttpConfig {
        verifier,
        skip_signature_validation: false,
    })
    .await
}

/// Start a server with the given HTTP configuration.
pub async fn start_server_with(config: StowryHttpConfig) -> Result<TestServer> {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let service = StowryHttpService::new(MemoryObjectStore::new(), config);

    tokio::spawn(stowry_http::serve(listener, service, std::future::pending()));

    let client = Client::new(format!("http://{addr}"), TEST_ACCESS_KEY, TEST_SECRET_KEY);

    Ok(TestServer {
        addr,
        client,
        http: reqwest::Client::new(),
    })
}

/// Generate a unique object path for a test.
#[must_use]
pub fn test_object_path(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("/files/{prefix}-{id}.txt")
}

mod test_auth;
mod test_health;
mod test_object;
