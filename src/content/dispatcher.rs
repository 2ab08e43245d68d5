use crate::config::ServerConfig;
use crate::content::resolver::{self, Resolved};
use crate::content::{listing, script, static_file};
use crate::error::ServeError;
use crate::http::mime;
use crate::http::request::Request;
use crate::http::response::Response;

/// Produces the response for a GET or HEAD request.
///
/// Listing for an index-less directory, 404 for anything that is not a regular file,
/// the interpreter for scripts, file bytes for the rest.
pub async fn dispatch(req: &Request, cfg: &ServerConfig) -> Response {
    let target = resolver::resolve(&cfg.root, &req.path).await;

    let result = match target {
        Resolved::Directory(dir) => Ok(listing::serve(&dir).await),
        Resolved::Missing(path) => Err(ServeError::FileNotFound(path.display().to_string())),
        Resolved::File(path) if mime::is_script(&path) => {
            script::run(&cfg.interpreter, &path, cfg.limits.max_script_output).await
        }
        Resolved::File(path) => static_file::serve(&path).await,
    };

    result.unwrap_or_else(|e| {
        match &e {
            ServeError::FileNotFound(_) => tracing::debug!(error = %e, "Not found"),
            _ => tracing::error!(error = %e, path = %req.path.to_string_lossy(), "Request failed"),
        }
        e.into_response()
    })
}
