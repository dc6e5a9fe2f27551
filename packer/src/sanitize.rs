//! Relative path sanitization with containment defense in depth.
//!
//! File-map keys are untrusted and may originate from any producer, so both
//! separator styles are treated as separators regardless of the host
//! platform: a key like `..\evil.txt` must be rejected on POSIX just as it
//! would be on Windows. After the staging target is computed,
//! [`ensure_within`] re-checks that the normalised target stays strictly
//! inside the staging root.

use crate::error::{PackError, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Validate and normalize an untrusted relative path from a file-map key.
///
/// Rejects absolute paths (leading separator or a drive-letter prefix such
/// as `C:`), `..` segments, and empty segments (leading, trailing, or
/// doubled separators). `.` segments are dropped. Returns the normalized
/// path with `/` separators.
///
/// # Errors
///
/// Returns [`PackError::UnsafePath`] describing the violated constraint.
///
/// # Examples
///
/// ```
/// use wharf_packer::sanitize::sanitize_relative_path;
///
/// let path = sanitize_relative_path("src/main.py").unwrap();
/// assert_eq!(path.as_str(), "src/main.py");
/// assert!(sanitize_relative_path("../evil.txt").is_err());
/// assert!(sanitize_relative_path("C:\\abs\\path.txt").is_err());
/// ```
pub fn sanitize_relative_path(raw: &str) -> Result<Utf8PathBuf> {
    if raw.starts_with('/') || raw.starts_with('\\') {
        return Err(unsafe_path(raw, "absolute paths are not allowed"));
    }
    if has_drive_prefix(raw) {
        return Err(unsafe_path(raw, "drive-letter paths are not allowed"));
    }

    let mut segments = Vec::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" => {
                return Err(unsafe_path(raw, "empty path segment"));
            }
            ".." => {
                return Err(unsafe_path(raw, "'..' segments are not allowed"));
            }
            "." => {}
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(unsafe_path(raw, "path has no segments"));
    }

    Ok(Utf8PathBuf::from(segments.join("/")))
}

/// Verify that `candidate` stays strictly inside `root` once normalised.
///
/// Second line of defense after [`sanitize_relative_path`]: the computed
/// staging target is normalised lexically and must remain below the
/// staging root. Catches any escape the per-segment checks missed.
///
/// # Errors
///
/// Returns [`PackError::UnsafePath`] if the candidate equals or escapes
/// the root.
pub fn ensure_within(root: &Utf8Path, candidate: &Utf8Path) -> Result<()> {
    let normalized = normalize_lexically(candidate)
        .ok_or_else(|| unsafe_path(candidate.as_str(), "path escapes the staging root"))?;
    let root_normalized = normalize_lexically(root)
        .ok_or_else(|| unsafe_path(root.as_str(), "staging root is not normalisable"))?;

    if normalized == root_normalized || !normalized.starts_with(&root_normalized) {
        return Err(unsafe_path(
            candidate.as_str(),
            "path escapes the staging root",
        ));
    }
    Ok(())
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// Returns `None` if a `..` component would climb above the path's start.
fn normalize_lexically(path: &Utf8Path) -> Option<Utf8PathBuf> {
    let mut normalized = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            other => normalized.push(other),
        }
    }
    Some(normalized)
}

/// Detect a Windows drive-letter prefix (`X:`) at the start of a path.
fn has_drive_prefix(raw: &str) -> bool {
    let mut chars = raw.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}

/// Construct an [`PackError::UnsafePath`] for the given path and reason.
fn unsafe_path(path: &str, reason: &str) -> PackError {
    PackError::UnsafePath {
        path: path.to_owned(),
        reason: reason.to_owned(),
    }
}
