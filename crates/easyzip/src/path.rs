//! Path normalization shared by the archiver and the extractor
//!
//! Every path this crate touches is turned into an absolute string that uses `/`
//! as its separator on every host. The same string is used to look things up on
//! disk and to derive archive entry names, which is what keeps an archive built
//! on Windows extractable on Unix and the other way around.

use crate::error::{ArchiveError, Result};
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Render every host separator in `path` as `/`
///
/// A no-op on hosts that already separate with `/`.
pub fn to_slash(path: &str) -> Cow<'_, str> {
    if MAIN_SEPARATOR == '/' {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(path.replace(MAIN_SEPARATOR, "/"))
    }
}

/// Resolve `path` to its absolute, lexically cleaned, slash-separated form
///
/// Relative paths are joined onto the current working directory. `.` components
/// are dropped and `..` removes the preceding component (never climbing above
/// the root). Symlinks are not resolved.
pub fn normalize(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(ArchiveError::invalid_path(path, "path is empty"));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| ArchiveError::invalid_path(path, e.to_string()))?;
        cwd.join(path)
    };

    let cleaned = clean(&absolute);
    let simplified = dunce::simplified(&cleaned);
    let utf8 = simplified
        .to_str()
        .ok_or_else(|| ArchiveError::invalid_path(path, "path is not valid UTF-8"))?;

    Ok(to_slash(utf8).into_owned())
}

/// Last element of `path`
///
/// Trailing slashes are ignored. Returns `"."` for an empty path and `"/"` for a
/// path consisting only of slashes.
pub fn base_name(path: &str) -> String {
    let path = to_slash(path);
    if path.is_empty() {
        return ".".to_string();
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    match trimmed.rfind('/') {
        Some(idx) => trimmed[idx + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// Everything in `path` except its last element
///
/// Returns `"."` when there is no directory part and `"/"` for direct children
/// of the root.
pub fn dir_name(path: &str) -> String {
    let path = to_slash(path);
    match path.rfind('/') {
        None => ".".to_string(),
        Some(idx) => {
            let dir = path[..idx].trim_end_matches('/');
            if dir.is_empty() {
                "/".to_string()
            } else {
                dir.to_string()
            }
        }
    }
}

/// Join two slash-separated fragments without doubling the separator
pub fn join(parent: &str, child: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}

fn clean(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}
