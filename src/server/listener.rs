use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::info;

use crate::config::ServerConfig;
use crate::http::connection::Connection;

/// Binds on all IPv4 interfaces at the configured port and serves forever.
pub async fn run(cfg: Arc<ServerConfig>) -> anyhow::Result<()> {
    let addr = ("0.0.0.0", cfg.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind port {}", cfg.port))?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, cfg).await
}

/// Accept loop. Each connection gets its own task; the loop itself only accepts,
/// spawns, and reaps finished workers.
pub async fn serve(listener: TcpListener, cfg: Arc<ServerConfig>) -> anyhow::Result<()> {
    let mut workers = JoinSet::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (socket, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!("Accept failed: {}", e);
                        continue;
                    }
                };
                tracing::debug!("Accepted connection from {}", peer);

                let config = Arc::clone(&cfg);
                workers.spawn(async move {
                    let mut conn = Connection::new(socket, Some(peer), config);
                    if let Err(e) = conn.run().await {
                        tracing::error!("Connection error from {}: {}", peer, e);
                    }
                });
            }

            Some(finished) = workers.join_next(), if !workers.is_empty() => {
                if let Err(e) = finished {
                    tracing::error!("Connection worker failed: {}", e);
                }
            }
        }
    }
}
