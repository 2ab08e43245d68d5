use thiserror::Error;

use crate::http::response::{Response, StatusCode};

/// Request-level failures that still get an answer.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("method {0} not implemented")]
    UnsupportedMethod(String),

    #[error("no file at {0}")]
    FileNotFound(String),

    #[error("failed to read {path}: {source}")]
    ReadFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {interpreter}: {source}")]
    SpawnFailure {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::UnsupportedMethod(_) => StatusCode::NotImplemented,
            ServeError::FileNotFound(_) => StatusCode::NotFound,
            ServeError::ReadFailure { .. } | ServeError::SpawnFailure { .. } => {
                StatusCode::InternalServerError
            }
        }
    }

    /// The fixed body shown to the client. Internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServeError::UnsupportedMethod(_) => "Method not implemented",
            ServeError::FileNotFound(_) => "File not found",
            ServeError::ReadFailure { .. } => "Failed to read file",
            ServeError::SpawnFailure { .. } => "Script execution failed",
        }
    }

    pub fn into_response(self) -> Response {
        Response::plain(self.status(), self.public_message())
    }
}
