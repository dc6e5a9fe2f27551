//! End-to-end packing: parse, validate, stage, archive, digest.
//!
//! All validation happens before any staging-directory mutation other than
//! its own creation, so a validation failure never leaves a partial
//! archive. The staging directory is removed on every exit path via the
//! [`StagingDir`] guard; a removal failure is logged, never surfaced.

use crate::archive::build_archive;
use crate::digest::{Sha256Digest, compute_sha256};
use crate::error::Result;
use crate::file_map::{FileMap, FileMapInput};
use crate::project_name::ProjectName;
use crate::staging::{StagingDir, ensure_dir};
use camino::{Utf8Path, Utf8PathBuf};

/// Output of a successful [`pack`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOutput {
    /// Absolute path of the produced zip archive.
    pub archive_path: Utf8PathBuf,
    /// SHA-256 digest of the archive file.
    pub sha256: Sha256Digest,
}

/// Pack a file map into `output_dir/<project_name>.zip`.
///
/// The map is materialized under `staging_root/<project_name>` (recreated
/// empty for this call, removed afterwards) and archived with every entry
/// rooted at the project name. An existing archive at the target path is
/// replaced, not merged.
///
/// Not safe for concurrent calls sharing the same staging root and project
/// name; use distinct staging roots per concurrent caller.
///
/// # Errors
///
/// Returns [`crate::error::PackError`] for malformed input
/// (`InvalidFileMap`, `InvalidJson`), a bad project name
/// (`InvalidProjectName`), an unsafe map key (`UnsafePath`), or a
/// filesystem failure (`Io`).
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use wharf_packer::file_map::FileMapInput;
/// use wharf_packer::pack::pack;
///
/// let input = FileMapInput::from(r##"{"README.md": "# Demo\n"}"##);
/// let output = pack(
///     input,
///     Utf8Path::new("work"),
///     Utf8Path::new("out"),
///     "demo",
/// )?;
/// assert!(output.archive_path.as_str().ends_with("demo.zip"));
/// # Ok::<(), wharf_packer::error::PackError>(())
/// ```
pub fn pack(
    input: FileMapInput,
    staging_root: &Utf8Path,
    output_dir: &Utf8Path,
    project_name: &str,
) -> Result<PackOutput> {
    let file_map = FileMap::parse(input)?;
    let project = ProjectName::try_from(project_name)?;

    ensure_dir(staging_root)?;
    ensure_dir(output_dir)?;

    // Resolve both roots so staging containment checks and the returned
    // archive path work on absolute paths.
    let staging_root = staging_root.canonicalize_utf8()?;
    let output_dir = output_dir.canonicalize_utf8()?;

    let staging = StagingDir::recreate(&staging_root, &project)?;
    staging.write_entries(&file_map)?;

    let archive_path = build_archive(staging.path(), &output_dir, &project.archive_filename())?;
    let sha256 = compute_sha256(archive_path.as_std_path())?;

    Ok(PackOutput {
        archive_path,
        sha256,
    })
}

#[cfg(test)]
#[path = "pack_tests.rs"]
mod tests;
