use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::ServerConfig;
use crate::content;
use crate::error::ServeError;
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Handles exactly one request on one connection.
pub struct Connection<S> {
    stream: S,
    peer: Option<SocketAddr>,
    config: Arc<ServerConfig>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: Option<SocketAddr>, config: Arc<ServerConfig>) -> Self {
        Self {
            stream,
            peer,
            config,
            state: ConnectionState::Reading,
        }
    }

    /// Reading → Processing → Writing → Closed. A request that cannot be parsed skips
    /// straight to Closed without a response.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    if let Some(req) = self.read_request().await? {
                        self.state = ConnectionState::Processing(req);
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = handle_request(&req, &self.config).await;

                    tracing::info!(
                        peer = ?self.peer,
                        method = %req.method,
                        path = %req.path.to_string_lossy(),
                        status = response.status.as_u16(),
                        bytes = response.body_len(),
                        "Request served"
                    );

                    let writer = if req.is_head() {
                        ResponseWriter::head_only(&response)
                    } else {
                        ResponseWriter::new(&response)
                    };
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    // Close is implied by dropping the stream; this just flushes the FIN early.
                    let _ = self.stream.shutdown().await;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// One read of up to the configured buffer size. Anything beyond it is never read.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let mut buf = vec![0u8; self.config.limits.read_buffer];
        let n = self.stream.read(&mut buf).await?;

        if n == 0 {
            // Client closed connection
            return Ok(None);
        }

        match parse_http_request(&buf[..n], &self.config.limits) {
            Ok(req) => Ok(Some(req)),
            Err(e) => {
                tracing::debug!(peer = ?self.peer, error = %e, "Dropping connection");
                Ok(None)
            }
        }
    }
}

/// Method filter, then content dispatch. Unsupported methods never touch the filesystem.
pub async fn handle_request(req: &Request, cfg: &ServerConfig) -> Response {
    if !req.method.is_supported() {
        return ServeError::UnsupportedMethod(req.method.to_string()).into_response();
    }

    content::dispatch(req, cfg).await
}
