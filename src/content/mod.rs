//! Content dispatch
//!
//! Maps a sanitized request path onto the filesystem root and decides what to send
//! back: file bytes, a generated directory listing, or script output.

pub mod dispatcher;
pub mod listing;
pub mod resolver;
pub mod script;
pub mod static_file;

pub use dispatcher::dispatch;
pub use resolver::{Resolved, resolve};
