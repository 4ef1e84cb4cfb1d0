//! Stowry Server - object storage gated by presigned URLs.
//!
//! Every request other than the health check must carry a valid Stowry
//! presigned URL signature. Objects are kept in memory.
//!
//! # Usage
//!
//! ```text
//! STOWRY_ACCESS_KEY=FE373CEF5632FDED3081 \
//! STOWRY_SECRET_KEY=9218d0ddfdb1779169f4b6b3b36df321099e98e9 \
//! stowry-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STOWRY_LISTEN` | `0.0.0.0:5708` | Bind address |
//! | `STOWRY_ACCESS_KEY` | *(unset)* | Access key accepted by the server |
//! | `STOWRY_SECRET_KEY` | *(unset)* | Secret key for `STOWRY_ACCESS_KEY` |
//! | `STOWRY_SKIP_SIGNATURE_VALIDATION` | `false` | Serve requests without verification |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;

use anyhow::{Context, Result, ensure};
use stowry_auth::Verifier;
use stowry_http::{MemoryObjectStore, StowryConfig, StowryHttpConfig, StowryHttpService};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the [`StowryHttpConfig`] from the application [`StowryConfig`].
fn build_http_config(config: &StowryConfig) -> StowryHttpConfig {
    match config.credential() {
        Some((access_key, _)) => {
            info!(access_key = %access_key, "configured credential provider from environment");
        }
        None => {
            warn!(
                "no STOWRY_ACCESS_KEY/STOWRY_SECRET_KEY configured, presigned URLs will be rejected"
            );
        }
    }

    StowryHttpConfig {
        verifier: Verifier::new(config.credential_provider()),
        skip_signature_validation: config.skip_signature_validation,
    }
}

/// Local address to probe for a server bound to `listen`.
fn probe_url(listen: &str) -> String {
    let addr = listen.replace("0.0.0.0", "127.0.0.1");
    format!("http://{addr}/health")
}

/// Ask a running server whether it reports itself as running.
async fn run_health_check(url: &str) -> Result<()> {
    let status: serde_json::Value = reqwest::get(url)
        .await
        .with_context(|| format!("cannot reach {url}"))?
        .error_for_status()?
        .json()
        .await?;

    ensure!(status["status"] == "running", "unhealthy response from {url}");
    Ok(())
}

/// Resolve once Ctrl-C is received.
async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("received shutdown signal");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = StowryConfig::from_env();

    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let healthy = run_health_check(&probe_url(&config.listen)).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.log_level)?;

    info!(
        listen = %config.listen,
        skip_signature_validation = config.skip_signature_validation,
        version = VERSION,
        "starting Stowry Server",
    );

    let service = StowryHttpService::new(MemoryObjectStore::new(), build_http_config(&config));

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");
    stowry_http::serve(listener, service, shutdown_signal()).await;
    info!("all connections drained, exiting");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_build_http_config_from_stowry_config() {
        let config = StowryConfig::builder()
            .access_key("AKID".into())
            .secret_key("secret".into())
            .skip_signature_validation(true)
            .build();
        let http_config = build_http_config(&config);

        assert!(http_config.skip_signature_validation);
    }

    #[test]
    fn test_should_probe_loopback_for_wildcard_listen() {
        assert_eq!(probe_url("0.0.0.0:5708"), "http://127.0.0.1:5708/health");
        assert_eq!(probe_url("10.0.0.7:80"), "http://10.0.0.7:80/health");
    }

    #[tokio::test]
    async fn test_should_pass_health_check_against_running_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let service =
            StowryHttpService::new(MemoryObjectStore::new(), StowryHttpConfig::default());
        tokio::spawn(stowry_http::serve(listener, service, std::future::pending()));

        run_health_check(&probe_url(&addr.to_string()))
            .await
            .expect("server is healthy");
    }

    #[tokio::test]
    async fn test_should_fail_health_check_without_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        assert!(run_health_check(&probe_url(&addr.to_string())).await.is_err());
    }

    #[test]
    fn test_should_reject_everything_without_credentials() {
        let config = StowryConfig::default();
        let http_config = build_http_config(&config);

        assert!(!http_config.skip_signature_validation);
        assert_eq!(
            http_config.verifier.verify_query(
                "GET",
                "/a",
                "X-Stowry-Credential=AKID&X-Stowry-Date=1&X-Stowry-Expires=1&X-Stowry-Signature=x"
            ),
            Err(stowry_auth::AuthError::InvalidCredential)
        );
    }
}
