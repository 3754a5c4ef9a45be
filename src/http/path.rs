//! URL path translation
//!
//! Maps a request path onto the filesystem below a root directory. The
//! mapping is purely lexical: `..` can never climb above the root. Symlinks
//! are checked separately by the static file handler.

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

/// Result of mapping a URL path below a root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    pub fs_path: PathBuf,
    /// The decoded URL path ended with `/`
    pub trailing_slash: bool,
}

/// Translate a URL path (without query string) to a path under `root`
pub fn translate_path(root: &Path, url_path: &str) -> TranslatedPath {
    let decoded = percent_decode_str(url_path).decode_utf8_lossy();
    let trailing_slash = decoded.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if is_plain_name(s) => segments.push(s),
            _ => {}
        }
    }

    let mut fs_path = root.to_path_buf();
    fs_path.extend(segments);
    TranslatedPath {
        fs_path,
        trailing_slash,
    }
}

/// A single normal path component: no separators, drive prefixes or NULs
fn is_plain_name(segment: &str) -> bool {
    if segment.contains('\0') {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
