//! Content-Type selection by file extension.

use std::os::unix::ffi::OsStrExt;
use std::path::Path;

pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

const EXTENSIONS: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("pdf", "application/pdf"),
];

/// Looks up the content type for a path's extension, ignoring case.
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = extension(path) else {
        return DEFAULT_CONTENT_TYPE;
    };

    EXTENSIONS
        .iter()
        .find(|(known, _)| known.as_bytes().eq_ignore_ascii_case(ext))
        .map_or(DEFAULT_CONTENT_TYPE, |&(_, mime)| mime)
}

/// True if the path names a script to hand to the interpreter.
pub fn is_script(path: &Path) -> bool {
    extension(path).is_some_and(|ext| ext.eq_ignore_ascii_case(b"php"))
}

/// Everything after the last `.` of the file name.
///
/// Unlike [`Path::extension`], a leading dot counts, so `.html` has extension `html`.
fn extension(path: &Path) -> Option<&[u8]> {
    let name = path.file_name()?.as_bytes();
    let dot = name.iter().rposition(|&b| b == b'.')?;
    Some(&name[dot + 1..])
}
