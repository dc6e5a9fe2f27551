//! Output formatting for the packer CLI.
//!
//! Progress and errors go to stderr; the machine-readable result object is
//! the only thing written to stdout, so callers can pipe it into other
//! tooling. Field names are the wire shape consumers already parse.

use crate::pack::PackOutput;
use serde::Serialize;
use std::io::Write;

/// Write a line to the given stderr handle, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Stdout result object for a pack run.
#[derive(Debug, Serialize)]
pub struct PackResult {
    /// Full path of the produced archive.
    pub zip_path: String,
    /// SHA-256 digest of the archive.
    pub sha256: String,
    /// Retrievable URL, present when the archive was also published.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PackResult {
    /// Build the result object from a pack output and an optional URL.
    #[must_use]
    pub fn new(output: &PackOutput, url: Option<String>) -> Self {
        Self {
            zip_path: output.archive_path.to_string(),
            sha256: output.sha256.to_string(),
            url,
        }
    }
}

/// Stdout result object for a publish run.
#[derive(Debug, Serialize)]
pub struct StorageResult {
    /// Retrievable URL of the published archive.
    pub url: String,
}

/// Serialize a result object to its single-line JSON wire form.
///
/// # Panics
///
/// Does not panic: the result structs contain only strings, which always
/// serialize.
#[must_use]
pub fn to_json_line<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).expect("result structs always serialize")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::Sha256Digest;
    use camino::Utf8PathBuf;

    fn sample_output() -> PackOutput {
        PackOutput {
            archive_path: Utf8PathBuf::from("/out/demo.zip"),
            sha256: Sha256Digest::new(&"a".repeat(64)).expect("valid digest"),
        }
    }

    #[test]
    fn pack_result_has_zip_path_and_sha256() {
        let json = to_json_line(&PackResult::new(&sample_output(), None));
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["zip_path"], "/out/demo.zip");
        assert_eq!(value["sha256"], "a".repeat(64));
        assert!(value.get("url").is_none());
    }

    #[test]
    fn pack_result_includes_url_when_published() {
        let result = PackResult::new(&sample_output(), Some("file:///out/demo.zip".to_owned()));
        let json = to_json_line(&result);
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["url"], "file:///out/demo.zip");
    }

    #[test]
    fn storage_result_wraps_url() {
        let json = to_json_line(&StorageResult {
            url: "file:///out/demo.zip".to_owned(),
        });
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["url"], "file:///out/demo.zip");
    }

    #[test]
    fn stderr_line_appends_newline() {
        let mut buffer = Vec::new();
        write_stderr_line(&mut buffer, "packing demo");
        assert_eq!(buffer, b"packing demo\n");
    }
}
