//! Generated HTML index for directories without an index file.

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// One line of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Raw file name, written into the page byte for byte
    pub name: OsString,
    pub size: EntrySize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySize {
    Dir,
    Bytes(u64),
    /// The entry could not be stat'ed
    Unknown,
}

impl Entry {
    fn size_label(&self) -> String {
        match self.size {
            EntrySize::Dir => "DIR".to_string(),
            EntrySize::Bytes(size) => size.to_string(),
            EntrySize::Unknown => "?".to_string(),
        }
    }
}

/// Builds the listing response for `dir`.
///
/// Entries come in filesystem order. If the directory cannot be opened the response is
/// still a 200, just without a body.
pub async fn serve(dir: &Path) -> Response {
    match collect_entries(dir).await {
        Ok(entries) => ResponseBuilder::new(StatusCode::Ok)
            .body(render(dir.as_os_str(), &entries))
            .header("Content-Type", "text/html")
            .build(),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Cannot open directory for listing");
            ResponseBuilder::new(StatusCode::Ok).build()
        }
    }
}

/// Enumerates `dir`, adding the parent entry that `read_dir` never yields.
///
/// An error partway through keeps what was gathered so far.
pub async fn collect_entries(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;

    let mut entries = vec![Entry {
        name: "..".into(),
        size: EntrySize::Dir,
    }];

    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Directory enumeration stopped early");
                break;
            }
        };

        // Follow symlinks like stat(2); a dangling link falls back to the link itself.
        let metadata = match tokio::fs::metadata(entry.path()).await {
            Ok(m) => Ok(m),
            Err(_) => entry.metadata().await,
        };

        let size = match metadata {
            Ok(m) if m.is_dir() => EntrySize::Dir,
            Ok(m) => EntrySize::Bytes(m.len()),
            Err(e) => {
                tracing::debug!(entry = ?entry.file_name(), error = %e, "Cannot stat listing entry");
                EntrySize::Unknown
            }
        };

        entries.push(Entry {
            name: entry.file_name(),
            size,
        });
    }

    Ok(entries)
}

/// Renders the listing document. Names are inserted verbatim.
pub fn render(title: &OsStr, entries: &[Entry]) -> Vec<u8> {
    let title = title.as_bytes();
    let mut html = Vec::new();

    let head: [&[u8]; 5] = [
        b"<html><head><title>Index of ",
        title,
        b"</title></head><body><h1>Index of ",
        title,
        b"</h1><ul>",
    ];
    head.iter().for_each(|part| html.extend_from_slice(part));

    for entry in entries {
        let name = entry.name.as_bytes();
        let size = entry.size_label();
        let line: [&[u8]; 7] = [
            b"<li><a href=\"",
            name,
            b"\">",
            name,
            b"</a> - ",
            size.as_bytes(),
            b"</li>",
        ];
        line.iter().for_each(|part| html.extend_from_slice(part));
    }

    html.extend_from_slice(b"</ul></body></html>");
    html
}
