use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeekExt};

use crate::error::ServeError;
use crate::http::mime;
use crate::http::response::Response;

/// Reads a whole file into a 200 response typed by its extension.
///
/// The size is probed by seeking to the end first. If the file then yields fewer bytes
/// than that (say it was truncated in between) the read fails and nothing partial is
/// served.
pub async fn serve(path: &Path) -> Result<Response, ServeError> {
    let content = read_whole(path)
        .await
        .map_err(|source| read_failure(path, source))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Serving static file");

    Ok(Response::ok(content, mime::content_type_for(path)))
}

fn read_failure(path: &Path, source: std::io::Error) -> ServeError {
    ServeError::ReadFailure {
        path: path.display().to_string(),
        source,
    }
}

async fn read_whole(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path).await?;

    let size = file.seek(SeekFrom::End(0)).await?;
    file.seek(SeekFrom::Start(0)).await?;

    read_sized(&mut file, size).await
}

/// Reads exactly `size` bytes. A reader that ends early is an error and the partial
/// buffer is dropped.
pub async fn read_sized<R: AsyncRead + Unpin>(reader: &mut R, size: u64) -> std::io::Result<Vec<u8>> {
    let len = usize::try_from(size)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::OutOfMemory, "file too large"))?;
    let mut content = vec![0u8; len];
    reader.read_exact(&mut content).await?;

    Ok(content)
}
