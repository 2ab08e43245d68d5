use thiserror::Error;

use crate::config::Limits;
use crate::http::path;
use crate::http::request::{Method, Request};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer holds no line terminator, so there is no request line to read.
    #[error("malformed request: no request line terminator")]
    MalformedRequest,
}

/// Parses one request out of whatever a single socket read produced.
///
/// Over-long request-line tokens are truncated to their limits, header lines without a
/// colon are skipped, and the path comes back percent-decoded and sanitized.
pub fn parse_http_request(buf: &[u8], limits: &Limits) -> Result<Request, ParseError> {
    let line_end = find_newline(buf).ok_or(ParseError::MalformedRequest)?;
    let request_line = strip_cr(&buf[..line_end]);

    let mut parts = request_line
        .split(|b| b.is_ascii_whitespace())
        .filter(|t| !t.is_empty());

    let method = truncate(parts.next().unwrap_or_default(), limits.max_method_len);
    let raw_path = truncate(parts.next().unwrap_or_default(), limits.max_path_len);
    let version = truncate(parts.next().unwrap_or_default(), limits.max_version_len);

    let headers = parse_headers(&buf[line_end + 1..], limits.max_headers);

    Ok(Request {
        method: Method::parse(&String::from_utf8_lossy(method)),
        path: path::clean(raw_path),
        version: String::from_utf8_lossy(version).into_owned(),
        headers,
    })
}

fn parse_headers(mut rest: &[u8], max_headers: usize) -> Vec<(String, String)> {
    let mut headers = Vec::new();

    // A trailing fragment without a terminator was cut off by the read cap.
    while let Some(end) = find_newline(rest) {
        let line = strip_cr(&rest[..end]);
        rest = &rest[end + 1..];

        if line.is_empty() {
            break;
        }
        if headers.len() >= max_headers {
            continue;
        }

        let Some(colon) = line.iter().position(|&b| b == b':') else {
            continue;
        };
        let key = &line[..colon];
        let value = &line[colon + 1..];
        let value_start = value.iter().position(|&b| b != b' ').unwrap_or(value.len());

        headers.push((
            String::from_utf8_lossy(key).into_owned(),
            String::from_utf8_lossy(&value[value_start..]).into_owned(),
        ));
    }

    headers
}

fn find_newline(buf: &[u8]) -> Option<usize> {
    buf.iter().position(|&b| b == b'\n')
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn truncate(token: &[u8], max: usize) -> &[u8] {
    &token[..token.len().min(max)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_http_request(req, &Limits::default()).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.header("Host").unwrap(), "example.com");
    }

    #[test]
    fn bare_newlines_accepted() {
        let req = b"GET /a HTTP/1.0\nAccept: */*\n\n";

        let parsed = parse_http_request(req, &Limits::default()).unwrap();

        assert_eq!(parsed.version, "HTTP/1.0");
        assert_eq!(parsed.headers, vec![("Accept".to_string(), "*/*".to_string())]);
    }
}
