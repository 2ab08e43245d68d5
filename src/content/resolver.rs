//! Request path to filesystem path.
//!
//! Resolution is plain byte concatenation onto the root. There is no
//! canonicalization and no symlink check; traversal protection is the parser's job.

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

/// Index files probed in a directory, highest priority first.
pub const INDEX_FILES: [&str; 3] = ["index.php", "index.html", "index.htm"];

/// What a request path turned out to name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A regular file, possibly an index file found inside a directory
    File(PathBuf),
    /// A directory with no index file
    Directory(PathBuf),
    /// Nothing servable
    Missing(PathBuf),
}

/// Joins the request path onto the root.
///
/// ```
/// # use hearth::content::resolver::join;
/// assert_eq!(join("/srv", "/a.txt"), "/srv/a.txt");
/// assert_eq!(join("/srv", "a.txt"), "/srv/a.txt");
/// assert_eq!(join("/srv", ""), "/srv/");
/// ```
pub fn join(root: impl AsRef<OsStr>, path: impl AsRef<OsStr>) -> OsString {
    let root = root.as_ref().as_bytes();
    let path = path.as_ref().as_bytes();

    let mut full = Vec::with_capacity(root.len() + path.len() + 1);
    full.extend_from_slice(root);
    if path.first() != Some(&b'/') {
        full.push(b'/');
    }
    full.extend_from_slice(path);

    OsString::from_vec(full)
}

/// Resolves a sanitized request path against `root`, probing for index files.
pub async fn resolve(root: impl AsRef<OsStr>, path: impl AsRef<OsStr>) -> Resolved {
    let full = join(root, path);

    if !is_dir(&full).await {
        let full = PathBuf::from(full);
        return if is_file(&full).await {
            Resolved::File(full)
        } else {
            Resolved::Missing(full)
        };
    }

    for name in INDEX_FILES {
        let candidate = PathBuf::from(join(&full, name));
        if is_file(&candidate).await {
            return Resolved::File(candidate);
        }
    }

    Resolved::Directory(PathBuf::from(full))
}

async fn is_dir(path: impl AsRef<Path>) -> bool {
    tokio::fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

async fn is_file(path: impl AsRef<Path>) -> bool {
    tokio::fs::metadata(path).await.is_ok_and(|m| m.is_file())
}
