//! Connection accept loop for [`StowryHttpService`].

use std::future::Future;

use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::handler::ObjectHandler;
use crate::service::StowryHttpService;

/// Serve HTTP/1 and HTTP/2 connections from `listener` until `shutdown` resolves.
///
/// In-flight connections are drained before this returns.
pub async fn serve<H, F>(listener: TcpListener, service: StowryHttpService<H>, shutdown: F)
where
    H: ObjectHandler,
    F: Future<Output = ()>,
{
    let graceful = GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());
    tokio::pin!(shutdown);

    loop {
        let (stream, peer_addr) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                    continue;
                }
            },
            () = &mut shutdown => break,
        };

        let conn = http
            .serve_connection(TokioIo::new(stream), service.clone())
            .into_owned();
        let conn = graceful.watch(conn);

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!(%peer_addr, error = %e, "connection closed with error");
            }
        });
    }

    info!("draining connections");
    graceful.shutdown().await;
}
