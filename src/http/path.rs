//! Request path decoding and sanitization.
//!
//! Both steps work on raw bytes: percent escapes may produce sequences that are not
//! valid UTF-8, and the traversal check has to see exactly what the filesystem will.

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

/// Bytes that could reach a shell through the script interpreter's argument.
const NEUTRALIZED: &[u8] = b"\\;|`";

/// Decodes `%XX` escapes and `+` in a request path.
///
/// An escape that is not followed by two hex digits is copied literally, including a
/// truncated escape at the very end of the input.
///
/// ```
/// # use hearth::http::path::percent_decode;
/// assert_eq!(percent_decode(b"/a%20b+c"), b"/a b c");
/// assert_eq!(percent_decode(b"/50%"), b"/50%");
/// ```
pub fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        match input[i] {
            b'%' => match (hex_value(input.get(i + 1)), hex_value(input.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
                _ => out.push(b'%'),
            },
            b'+' => out.push(b' '),
            other => out.push(other),
        }
        i += 1;
    }

    out
}

fn hex_value(byte: Option<&u8>) -> Option<u8> {
    let b = *byte?;
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Returns true if `..` appears immediately before a `/` or the end of the path.
pub fn has_traversal(path: &[u8]) -> bool {
    path.windows(2)
        .enumerate()
        .any(|(i, w)| w == b".." && matches!(path.get(i + 2), None | Some(b'/')))
}

/// Sanitizes a decoded path in place.
///
/// A traversal attempt empties the whole path, which the resolver serves as the root.
/// Otherwise shell metacharacters are replaced with `_`.
pub fn sanitize(path: &mut Vec<u8>) {
    if has_traversal(path) {
        path.clear();
        return;
    }

    for b in path.iter_mut() {
        if NEUTRALIZED.contains(b) {
            *b = b'_';
        }
    }
}

/// Decodes and sanitizes a raw path token, producing the path the resolver sees.
pub fn clean(raw: &[u8]) -> OsString {
    let mut decoded = percent_decode(raw);
    sanitize(&mut decoded);
    OsString::from_vec(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mixed_case_hex() {
        assert_eq!(percent_decode(b"%2f%2F%41"), b"//A");
    }

    #[test]
    fn incomplete_escape_is_literal() {
        assert_eq!(percent_decode(b"%"), b"%");
        assert_eq!(percent_decode(b"%4"), b"%4");
        assert_eq!(percent_decode(b"a%zz"), b"a%zz");
        assert_eq!(percent_decode(b"%4g1"), b"%4g1");
    }

    #[test]
    fn decoding_without_escapes_is_identity() {
        for input in ["/", "/index.html", "/a/b/c.txt", "", "/~user/x-y_z"] {
            let once = percent_decode(input.as_bytes());
            assert_eq!(once, input.as_bytes());
            assert_eq!(percent_decode(&once), once);
        }
    }

    #[test]
    fn traversal_detection() {
        assert!(has_traversal(b".."));
        assert!(has_traversal(b"/../etc/passwd"));
        assert!(has_traversal(b"/a/.."));
        assert!(has_traversal(b"/foo../bar"));
        assert!(!has_traversal(b"/..foo"));
        assert!(!has_traversal(b"/a.b/c"));
        assert!(!has_traversal(b"/."));
    }

    #[test]
    fn traversal_empties_path() {
        let mut path = b"/a/../../etc/passwd".to_vec();
        sanitize(&mut path);
        assert!(path.is_empty());
    }

    #[test]
    fn metacharacters_replaced() {
        let mut path = b"/a\\b;c|d`e".to_vec();
        sanitize(&mut path);
        assert_eq!(path, b"/a_b_c_d_e");
    }

    #[test]
    fn encoded_traversal_caught_after_decoding() {
        assert_eq!(clean(b"/%2e%2e/secret"), "");
        assert_eq!(clean(b"/x/%2E%2E"), "");
    }

    #[test]
    fn non_utf8_escape_kept_as_byte() {
        use std::os::unix::ffi::OsStrExt;

        assert_eq!(clean(b"/caf%E9.txt").as_bytes(), b"/caf\xe9.txt");
    }

    #[test]
    fn encoded_metacharacters_neutralized() {
        assert_eq!(clean(b"/run.php%3Brm+-rf"), "/run.php_rm -rf");
    }
}
