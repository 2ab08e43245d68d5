//! hearth - a small HTTP origin server
//!
//! Serves files, directory listings, and interpreter-run scripts from a root directory,
//! one request per connection.

pub mod config;
pub mod content;
pub mod error;
pub mod http;
pub mod server;
