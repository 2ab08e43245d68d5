//! Script execution through an external interpreter.
//!
//! The interpreter gets the script path as its only argument. Its stdout becomes the
//! response body; stderr goes wherever the server's own stderr goes.

use std::path::Path;
use std::process::Stdio;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::error::ServeError;
use crate::http::response::Response;

const CHUNK: usize = 8192;

/// Output collected from a child, cut at the configured cap.
#[derive(Debug)]
pub struct Captured {
    pub bytes: BytesMut,
    pub truncated: bool,
}

/// Runs `interpreter script` and answers with whatever it printed.
///
/// The exit status is only logged: a failing or silent script still produces a 200.
/// Output past `max_output` bytes is dropped and the child is killed.
pub async fn run(interpreter: &str, script: &Path, max_output: usize) -> Result<Response, ServeError> {
    let spawn_failure = |source| ServeError::SpawnFailure {
        interpreter: interpreter.to_string(),
        source,
    };

    let mut child = Command::new(interpreter)
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(spawn_failure)?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| spawn_failure(std::io::Error::other("child stdout was not captured")))?;

    let captured = drain(&mut stdout, max_output).await;
    drop(stdout);

    if captured.truncated {
        tracing::warn!(
            script = %script.display(),
            limit = max_output,
            "Script output exceeded limit, truncating and killing interpreter"
        );
        if let Err(e) = child.start_kill() {
            tracing::debug!(error = %e, "Interpreter already gone");
        }
    }

    match child.wait().await {
        Ok(status) if !status.success() => {
            tracing::warn!(script = %script.display(), %status, "Interpreter exited unsuccessfully");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(script = %script.display(), error = %e, "Failed to wait for interpreter");
        }
    }

    tracing::debug!(script = %script.display(), bytes = captured.bytes.len(), "Script finished");

    Ok(Response::ok(captured.bytes.to_vec(), "text/html"))
}

/// Reads `reader` to end of stream, keeping at most `cap` bytes.
///
/// A read error ends the drain with whatever was collected.
pub async fn drain<R>(reader: &mut R, cap: usize) -> Captured
where
    R: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(CHUNK);

    loop {
        buf.reserve(CHUNK);
        match reader.read_buf(&mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Error reading interpreter output");
                break;
            }
        }

        if buf.len() > cap {
            buf.truncate(cap);
            return Captured {
                bytes: buf,
                truncated: true,
            };
        }
    }

    Captured {
        bytes: buf,
        truncated: false,
    }
}
