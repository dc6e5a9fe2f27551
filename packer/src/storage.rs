//! Publishing archives to a retrievable URL.
//!
//! The resolver is a capability handed to callers by composition: the core
//! never knows which backend it is talking to. The in-tree implementation
//! resolves to a `file://` URL; deployments substitute an object-store
//! uploader satisfying the same contract.

use crate::error::StorageError;
use camino::Utf8Path;
use url::Url;

/// Strategy mapping a local archive path to an externally retrievable URL.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use wharf_packer::storage::{LocalFileResolver, PublishResolver};
///
/// let resolver = LocalFileResolver;
/// let url = resolver.publish(Utf8Path::new("out/demo.zip"))?;
/// assert!(url.starts_with("file://"));
/// # Ok::<(), wharf_packer::error::StorageError>(())
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait PublishResolver {
    /// Publish the file at `local_path` and return its URL.
    ///
    /// Ownership of the underlying file is not transferred; the file must
    /// remain in place for the URL to stay valid.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::FileNotFound`] if the path does not exist
    /// or is not a regular file, or [`StorageError::Io`] on resolution
    /// failures.
    fn publish(&self, local_path: &Utf8Path) -> Result<String, StorageError>;
}

/// Resolver returning a percent-encoded `file://` URL for a local path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileResolver;

impl PublishResolver for LocalFileResolver {
    fn publish(&self, local_path: &Utf8Path) -> Result<String, StorageError> {
        if !local_path.is_file() {
            return Err(StorageError::FileNotFound {
                path: local_path.to_owned(),
            });
        }
        let absolute = local_path.canonicalize_utf8()?;
        let url = Url::from_file_path(absolute.as_std_path()).map_err(|()| {
            StorageError::UnrepresentablePath {
                path: absolute.clone(),
            }
        })?;
        Ok(String::from(url))
    }
}
