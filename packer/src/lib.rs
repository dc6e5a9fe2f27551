//! Wharf packer library.
//!
//! Turns a logical file tree — a JSON mapping from relative path to text
//! content — into a zip archive on disk, with path-traversal defense at
//! every step, and resolves produced archives to retrievable URLs through a
//! pluggable publisher. Used by the `wharf-packer` CLI binary and
//! consumable programmatically.
//!
//! # Modules
//!
//! - [`archive`] - Zip assembly from the staged project tree
//! - [`cli`] - Command-line argument definitions
//! - [`digest`] - SHA-256 digests for produced archives
//! - [`error`] - Semantic error types for packing and publishing
//! - [`file_map`] - File map parsing and validation
//! - [`output`] - CLI output formatting
//! - [`pack`] - End-to-end packing orchestration
//! - [`project_name`] - Validated project name newtype
//! - [`sanitize`] - Relative path sanitization and containment checks
//! - [`staging`] - Ephemeral staging directory management
//! - [`storage`] - Publish resolver trait and local `file://` implementation

pub mod archive;
pub mod cli;
pub mod digest;
pub mod error;
pub mod file_map;
pub mod output;
pub mod pack;
pub mod project_name;
pub mod sanitize;
pub mod staging;
pub mod storage;
