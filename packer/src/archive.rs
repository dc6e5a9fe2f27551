//! Zip archive assembly from a staged project tree.
//!
//! Walks the staging directory, sorts the regular files it finds by path,
//! and writes them into a deflate-compressed zip whose entry names are
//! relative to the staging directory's *parent* — so every entry carries
//! the project name as its leading component, and extraction reproduces a
//! top-level directory named after the project.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Build `output_dir/archive_name` from the files under `staging_dir`.
///
/// An existing archive at the target path is deleted first and rebuilt
/// from scratch, never merged. The replace is not atomic: a failure
/// between the delete and completion leaves no archive at that path.
/// Directories are not stored as entries; entry order is the sorted
/// relative path order, so identical trees produce identical entry sets.
///
/// Returns the archive path.
///
/// # Errors
///
/// Returns [`crate::error::PackError::Io`] if the staged tree cannot be
/// read or the archive cannot be written.
pub fn build_archive(
    staging_dir: &Utf8Path,
    output_dir: &Utf8Path,
    archive_name: &str,
) -> Result<Utf8PathBuf> {
    let archive_path = output_dir.join(archive_name);
    if archive_path.exists() {
        fs::remove_file(&archive_path)?;
    }

    let mut files = Vec::new();
    collect_files(staging_dir, &mut files)?;
    files.sort();

    // Naming entries from the staging parent keeps the project name as the
    // top-level directory inside the archive.
    let entry_root = staging_dir.parent().unwrap_or(staging_dir);

    let output_file = fs::File::create(&archive_path)?;
    let mut writer = ZipWriter::new(output_file);
    // Fixed timestamp keeps repeated packs of the same tree byte-identical.
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for file in &files {
        let entry_name = entry_name_for(file, entry_root);
        writer.start_file(entry_name, options)?;
        let mut source = fs::File::open(file)?;
        io::copy(&mut source, &mut writer)?;
    }

    writer.finish()?;
    Ok(archive_path)
}

/// Recursively collect regular files under `dir`.
fn collect_files(dir: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(entry.path(), files)?;
        } else if file_type.is_file() {
            files.push(entry.path().to_owned());
        }
    }
    Ok(())
}

/// Archive entry name for `file`: its path relative to `entry_root`, with
/// `/` separators regardless of platform.
fn entry_name_for(file: &Utf8Path, entry_root: &Utf8Path) -> String {
    let relative = file.strip_prefix(entry_root).unwrap_or(file);
    let segments: Vec<&str> = relative.components().map(|c| c.as_str()).collect();
    segments.join("/")
}
