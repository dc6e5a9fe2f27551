//! CLI argument definitions for the packer binary.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Pack a JSON file map into a zip archive and publish it.
#[derive(Parser, Debug)]
#[command(name = "wharf-packer")]
#[command(version, about)]
#[command(long_about = concat!(
    "Pack a JSON file map into a zip archive.\n\n",
    "The file map is a JSON object whose keys are relative paths and whose ",
    "values are UTF-8 file contents. The map is materialized in an ephemeral ",
    "staging directory, archived as <project-name>.zip with every entry ",
    "rooted at the project name, and the staging directory is removed again.\n\n",
    "Keys that are absolute, contain '..' segments, or would otherwise escape ",
    "the project root are rejected before anything is written.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Pack a received file map into shipping/scallion.zip:\n",
    "    $ wharf-packer pack --file-map receiving/scallion.json \\\n",
    "        --project-name scallion --output-dir shipping\n\n",
    "  Pack from stdin and print the file:// URL as well:\n",
    "    $ cat map.json | wharf-packer pack -f - -p demo --publish\n\n",
    "  Resolve an existing archive to a URL:\n",
    "    $ wharf-packer publish shipping/scallion.zip\n",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Pack a JSON file map into a zip archive.
    Pack(PackArgs),

    /// Resolve an existing archive to a retrievable URL.
    Publish(PublishArgs),
}

/// Arguments for the pack command.
#[derive(Parser, Debug, Clone)]
pub struct PackArgs {
    /// Path to the JSON file map, or `-` to read from stdin.
    #[arg(short, long, value_name = "PATH")]
    pub file_map: Utf8PathBuf,

    /// Project name: staging directory name, archive stem, and the
    /// top-level directory inside the archive.
    #[arg(short, long, value_name = "NAME")]
    pub project_name: String,

    /// Root directory for the ephemeral staging area
    /// [default: wharf-packer under the system temp directory].
    #[arg(long, value_name = "DIR")]
    pub staging_dir: Option<Utf8PathBuf>,

    /// Directory the archive is written to.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: Utf8PathBuf,

    /// Also resolve the produced archive to a file:// URL.
    #[arg(long)]
    pub publish: bool,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

/// Default staging root when `--staging-dir` is not given.
///
/// Lives under the system temp directory, never the working directory: the
/// staging area at `<root>/<project_name>` is recreated empty on every run,
/// and a working-directory default would let a project name like `src`
/// silently delete an unrelated directory of the same name.
#[must_use]
pub fn default_staging_dir() -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(std::env::temp_dir().join("wharf-packer"))
        .unwrap_or_else(|path| Utf8PathBuf::from(path.to_string_lossy().into_owned()))
}

/// Arguments for the publish command.
#[derive(Parser, Debug, Clone)]
pub struct PublishArgs {
    /// Path to a previously produced archive.
    #[arg(value_name = "PATH")]
    pub archive: Utf8PathBuf,
}
