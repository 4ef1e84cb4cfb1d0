//! Stowry Presign - issue presigned URLs from the command line.
//!
//! # Usage
//!
//! ```text
//! stowry-presign <METHOD> <PATH> [EXPIRES]
//! stowry-presign demo
//! ```
//!
//! `METHOD` is any HTTP verb (`GET`, `PUT`, `DELETE`, ...). `EXPIRES` is the
//! validity period in seconds; it defaults to 900 and is capped at 604800.
//!
//! The `demo` command issues GET/PUT/DELETE URLs and verifies one of them
//! locally, printing each step.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STOWRY_ENDPOINT` | `http://localhost:5708` | Base URL of the server |
//! | `STOWRY_ACCESS_KEY` | *(required)* | Access key embedded in URLs |
//! | `STOWRY_SECRET_KEY` | *(required)* | Secret key used to sign |
//! | `LOG_LEVEL` | `warn` | Log level filter (written to stderr) |

use anyhow::{Context, Result, bail};
use stowry_auth::{Client, DEFAULT_EXPIRES, StaticCredentialProvider, Verifier};
use stowry_http::StowryConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Credential used by `demo` when none is configured.
const DEMO_ACCESS_KEY: &str = "FE373CEF5632FDED3081";
const DEMO_SECRET_KEY: &str = "9218d0ddfdb1779169f4b6b3b36df321099e98e9";

const USAGE: &str = "usage: stowry-presign <METHOD> <PATH> [EXPIRES] | stowry-presign demo";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Print one presigned URL.
    Presign {
        method: String,
        path: String,
        expires: i64,
    },
    /// Walk through issuance and verification.
    Demo,
}

/// Parse the arguments following the program name.
fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [cmd] if cmd == "demo" => Ok(Command::Demo),
        [method, path] => Ok(Command::Presign {
            method: method.to_ascii_uppercase(),
            path: path.clone(),
            expires: DEFAULT_EXPIRES,
        }),
        [method, path, expires] => Ok(Command::Presign {
            method: method.to_ascii_uppercase(),
            path: path.clone(),
            expires: expires
                .parse()
                .with_context(|| format!("invalid EXPIRES value: {expires}"))?,
        }),
        _ => bail!(USAGE),
    }
}

/// Build a client from the configured endpoint and credential.
fn configured_client(config: &StowryConfig) -> Result<Client> {
    let (access_key, secret_key) = config
        .credential()
        .context("STOWRY_ACCESS_KEY and STOWRY_SECRET_KEY must be set")?;
    Ok(Client::new(config.endpoint.as_str(), access_key, secret_key))
}

/// Issue GET/PUT/DELETE URLs, then verify the GET URL locally.
fn run_demo(config: &StowryConfig) -> Result<Vec<String>> {
    let (access_key, secret_key) = config
        .credential()
        .unwrap_or((DEMO_ACCESS_KEY, DEMO_SECRET_KEY));
    let client = Client::new(config.endpoint.as_str(), access_key, secret_key);

    let mut lines = vec!["=== Client ===".to_owned()];
    lines.push(format!("GET URL: {}", client.presign_get("/files/document.pdf", 900)));
    lines.push(format!("PUT URL: {}", client.presign_put("/files/upload.txt", 900)));
    lines.push(format!("DELETE URL: {}", client.presign_delete("/files/old.txt", 900)));

    lines.push("=== Server ===".to_owned());
    let verifier = Verifier::new(StaticCredentialProvider::new(vec![(
        access_key.to_owned(),
        secret_key.to_owned(),
    )]));

    let path = "/files/test.txt";
    let url = client.presign_get(path, 900);
    let (_, query) = url
        .split_once('?')
        .context("presigned URL has no query string")?;
    debug!(url = %url, "verifying presigned URL");

    match verifier.verify_query("GET", path, query) {
        Ok(()) => lines.push("Verification succeeded!".to_owned()),
        Err(err) => lines.push(format!("Verification failed: {err}")),
    }

    Ok(lines)
}

fn main() -> Result<()> {
    let config = StowryConfig::from_env();

    let filter = if std::env::var("LOG_LEVEL").is_ok() {
        EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level filter: {}", config.log_level))?
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Presign {
            method,
            path,
            expires,
        } => {
            let client = configured_client(&config)?;
            println!("{}", client.presign(&method, &path, expires));
        }
        Command::Demo => {
            for line in run_demo(&config)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}
