//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.x side of the server: one request and one response
//! per connection, no keep-alive.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection worker driving the request-response state machine
//! - **`parser`**: Parses the bytes of a single socket read into a request
//! - **`path`**: Percent-decoding and sanitization of the request path
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read of up to the buffer cap
//!        └──────┬──────┘
//!               │ Request parsed (otherwise → Closed, no response)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Method filter, resolve, dispatch
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod path;
pub mod request;
pub mod response;
pub mod writer;
