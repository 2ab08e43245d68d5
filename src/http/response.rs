use chrono::Utc;

/// Value of the `Server` header sent with every response.
pub const SERVER_ID: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// HTTP status codes the server produces.
///
/// - `Ok` (200): content, listing, or script output
/// - `NotFound` (404): nothing to serve at that path
/// - `InternalServerError` (500): file read or script spawn failed
/// - `NotImplemented` (501): method other than GET or HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep insertion order and may repeat. `Date` and `Server` always come first.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in the order they go on the wire
    pub headers: Vec<(String, String)>,
    /// Response body, absent when nothing was attached
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use hearth::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .body(b"{}".to_vec())
///     .header("Content-Type", "application/json")
///     .build();
/// assert_eq!(response.header("Content-Length"), Some("2"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl ResponseBuilder {
    /// Creates a builder already carrying the `Date` and `Server` headers.
    pub fn new(status: StatusCode) -> Self {
        let date = Utc::now().format(HTTP_DATE_FORMAT).to_string();
        Self {
            status,
            headers: vec![
                ("Date".to_string(), date),
                ("Server".to_string(), SERVER_ID.to_string()),
            ],
            body: None,
        }
    }

    /// Appends a header. Existing headers with the same name are kept.
    ///
    /// Values go on the wire unescaped, so they must never carry client input.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Attaches the body and appends a matching `Content-Length` header.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.headers
            .push(("Content-Length".to_string(), body.len().to_string()));
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK response with the given body and content type.
    pub fn ok(body: impl Into<Vec<u8>>, content_type: &str) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .body(body.into())
            .header("Content-Type", content_type)
            .build()
    }

    /// A response with a short plain-text body, used for every error status.
    pub fn plain(status: StatusCode, message: &str) -> Self {
        ResponseBuilder::new(status)
            .body(message.as_bytes().to_vec())
            .header("Content-Type", "text/plain")
            .build()
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }
}
