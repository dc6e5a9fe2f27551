//! SHA-256 digests for produced archives.
//!
//! The digest newtype validates that the value is a 64-character lowercase
//! hexadecimal string; [`compute_sha256`] produces one by reading a file in
//! chunks.

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// A validated hex-encoded SHA-256 digest string.
///
/// # Examples
///
/// ```
/// use wharf_packer::digest::Sha256Digest;
///
/// let hex = "a".repeat(64);
/// let digest = Sha256Digest::new(&hex).unwrap();
/// assert_eq!(digest.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Validate and wrap a hex digest string.
    ///
    /// Returns `None` if the value is not 64 lowercase hex characters.
    #[must_use]
    pub fn new(value: &str) -> Option<Self> {
        let well_formed = value.len() == DIGEST_HEX_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase());
        well_formed.then(|| Self(value.to_owned()))
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the SHA-256 digest of a file.
///
/// Reads the file at `path` in chunks and returns the lowercase hex digest.
///
/// # Errors
///
/// Returns [`crate::error::PackError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<Sha256Digest> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    let hex = format!("{:x}", hasher.finalize());
    // sha2 always produces valid 64-char lowercase hex.
    Ok(Sha256Digest::new(&hex).expect("sha2 produces valid 64-char lowercase hex"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn computes_known_digest_of_empty_file() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("empty.bin");
        fs::write(&path, b"").expect("write");
        let digest = compute_sha256(&path).expect("digest succeeds");
        assert_eq!(
            digest.as_str(),
            concat!(
                "e3b0c44298fc1c149afbf4c8996fb924",
                "27ae41e4649b934ca495991b7852b855"
            )
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Sha256Digest::new("abc").is_none());
        assert!(Sha256Digest::new(&"A".repeat(64)).is_none());
        assert!(Sha256Digest::new(&"g".repeat(64)).is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = TempDir::new().expect("temp dir");
        let result = compute_sha256(&temp.path().join("missing.bin"));
        assert!(result.is_err());
    }
}
