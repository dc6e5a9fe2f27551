//! Packer CLI entrypoint.
//!
//! Packs a JSON file map into a zip archive rooted at the project name, and
//! optionally resolves the archive to a `file://` URL. Progress goes to
//! stderr; the result object goes to stdout.

use camino::Utf8Path;
use clap::Parser;
use std::io::{Read, Write};
use thiserror::Error;
use wharf_packer::cli::{Cli, Command, PackArgs, PublishArgs, default_staging_dir};
use wharf_packer::error::{PackError, StorageError};
use wharf_packer::file_map::FileMapInput;
use wharf_packer::output::{PackResult, StorageResult, to_json_line, write_stderr_line};
use wharf_packer::pack::pack;
use wharf_packer::storage::{LocalFileResolver, PublishResolver};

/// Errors surfaced by the CLI, from either boundary operation.
#[derive(Debug, Error)]
enum CliError {
    /// The packing pipeline failed.
    #[error(transparent)]
    Pack(#[from] PackError),

    /// Publishing the archive failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The file map could not be read from disk or stdin.
    #[error("cannot read file map from {path}: {source}")]
    FileMapRead {
        /// The path given on the command line.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<(), CliError> {
    match &cli.command {
        Command::Pack(args) => run_pack(args, stderr),
        Command::Publish(args) => run_publish(args, stderr),
    }
}

fn run_pack(args: &PackArgs, stderr: &mut dyn Write) -> Result<(), CliError> {
    let text = read_file_map(&args.file_map)?;

    if !args.quiet {
        write_stderr_line(stderr, format!("Packing project {}...", args.project_name));
    }

    let staging_dir = args.staging_dir.clone().unwrap_or_else(default_staging_dir);
    let output = pack(
        FileMapInput::from(text),
        &staging_dir,
        &args.output_dir,
        &args.project_name,
    )?;

    if !args.quiet {
        write_stderr_line(
            stderr,
            format!("Wrote {} (sha256 {})", output.archive_path, output.sha256),
        );
    }

    let url = if args.publish {
        Some(LocalFileResolver.publish(&output.archive_path)?)
    } else {
        None
    };

    println!("{}", to_json_line(&PackResult::new(&output, url)));
    Ok(())
}

fn run_publish(args: &PublishArgs, stderr: &mut dyn Write) -> Result<(), CliError> {
    let url = LocalFileResolver.publish(&args.archive)?;
    write_stderr_line(stderr, format!("Published {}", args.archive));
    println!("{}", to_json_line(&StorageResult { url }));
    Ok(())
}

/// Read the file map JSON from a file, or from stdin when the path is `-`.
fn read_file_map(path: &Utf8Path) -> Result<String, CliError> {
    let read_error = |source| CliError::FileMapRead {
        path: path.to_string(),
        source,
    };

    if path.as_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(read_error)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(read_error)
    }
}

fn exit_code_for_run_result(result: Result<(), CliError>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn success_maps_to_exit_code_zero() {
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Ok(()), &mut stderr), 0);
        assert!(stderr.is_empty());
    }

    #[rstest]
    #[case::pack_error(CliError::Pack(PackError::InvalidProjectName {
        name: "a/b".to_owned(),
        reason: "name must not contain path separators".to_owned(),
    }))]
    #[case::storage_error(CliError::Storage(StorageError::FileNotFound {
        path: camino::Utf8PathBuf::from("missing.zip"),
    }))]
    fn failure_maps_to_exit_code_one_and_reports(#[case] error: CliError) {
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Err(error), &mut stderr), 1);
        assert!(!stderr.is_empty());
    }

    #[test]
    fn missing_file_map_is_a_read_error() {
        let result = read_file_map(Utf8Path::new("no/such/map.json"));
        assert!(matches!(result, Err(CliError::FileMapRead { .. })));
    }
}
