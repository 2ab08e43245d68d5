//! Detaching from the controlling terminal.
//!
//! Must run before the tokio runtime exists: forking a process that already has
//! runtime threads leaves the child with only the forking thread.

use std::fs::OpenOptions;
use std::os::unix::io::{AsRawFd, RawFd};

use anyhow::Context;
use nix::sys::stat::{Mode, umask};
use nix::unistd::{ForkResult, dup2, fork, setsid};

const PATH_DEVNULL: &str = "/dev/null";
const STDIN_FILENO: RawFd = 0;
const STDOUT_FILENO: RawFd = 1;
const STDERR_FILENO: RawFd = 2;

/// Forks into the background. Only the child returns.
pub fn daemonize() -> anyhow::Result<()> {
    // SAFETY: called from main before any other thread is started.
    match unsafe { fork() }.context("failed to fork")? {
        ForkResult::Parent { .. } => std::process::exit(0),
        ForkResult::Child => {}
    }

    setsid().context("failed to create new session")?;
    umask(Mode::empty());

    let devnull_in = OpenOptions::new()
        .read(true)
        .open(PATH_DEVNULL)
        .with_context(|| format!("failed to open {PATH_DEVNULL}"))?;
    let devnull_out = OpenOptions::new()
        .write(true)
        .open(PATH_DEVNULL)
        .with_context(|| format!("failed to open {PATH_DEVNULL}"))?;

    dup2(devnull_in.as_raw_fd(), STDIN_FILENO).context("failed to redirect stdin")?;
    dup2(devnull_out.as_raw_fd(), STDOUT_FILENO).context("failed to redirect stdout")?;
    dup2(devnull_out.as_raw_fd(), STDERR_FILENO).context("failed to redirect stderr")?;

    Ok(())
}

