//! Process-level plumbing: the accept loop and daemonization.

pub mod daemon;
pub mod listener;
