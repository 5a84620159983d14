//! Command-line interface definitions.
//!
//! Every path or naming flag is optional; unset flags fall back to the loaded
//! settings.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::error::Error;

#[derive(Debug, Parser)]
#[command(
    name = "shelfcheck",
    version,
    about = "Audit and tidy a beets music library and its converted copy",
    long_about = "Each subcommand prints the paths it found to stdout, one per line, and exits \
                  with 1 when anything was found (or left unfixed), 0 otherwise."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log what is being scanned and changed to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List albums that do not contain an artifact
    MissingArtifacts {
        /// Library to search, laid out as <artist>/<album>
        #[arg(long)]
        dir: Option<PathBuf>,

        /// File name of the artifact to look for
        #[arg(long, default_value = "cover.jpg")]
        artifact: String,
    },

    /// List catalog tracks that are missing from the library
    MissingCatalogTracks {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Library the catalog was imported into
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Only compare tracks with this extension, rewriting catalog paths to
        /// it; defaults to every configured track extension
        #[arg(long)]
        ext: Option<String>,
    },

    /// List catalog tracks with no transcoded copy in the converted library
    MissingConvertedTracks {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Converted library to search
        #[arg(long)]
        dir: Option<PathBuf>,

        #[command(flatten)]
        subdirs: SubdirArgs,

        /// Extension of the converted tracks
        #[arg(long)]
        ext: Option<String>,
    },

    /// Copy cover.jpg into converted albums that lack it
    CopyCovers {
        /// Source library, laid out as <artist>/<album>
        #[arg(long)]
        dir: Option<PathBuf>,

        #[command(flatten)]
        subdirs: SubdirArgs,

        /// Only list converted albums without a cover
        #[arg(long, value_name = "BOOL", action = ArgAction::Set, num_args = 0..=1, default_value = "no",
              default_missing_value = "yes", value_parser = parse_bool_arg)]
        dry_run: bool,

        /// Embed the copied cover into the converted tracks
        #[arg(long, value_name = "BOOL", action = ArgAction::Set, num_args = 0..=1, default_value = "no",
              default_missing_value = "yes", value_parser = parse_bool_arg)]
        embed: bool,
    },

    /// Rename, delete or move artifacts not named after their album
    FixArtifacts {
        /// Library to search, laid out as <artist>/<album>
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Extension of the artifacts to fix; jpg skips cover.jpg
        #[arg(long, default_value = "cue", conflicts_with = "directories")]
        ext: String,

        /// Treat subdirectories of album folders as the artifacts
        #[arg(long)]
        directories: bool,

        /// Delete the artifacts instead of renaming them (DANGEROUS)
        #[arg(long, value_name = "BOOL", action = ArgAction::Set, num_args = 0..=1, default_value = "no",
              default_missing_value = "yes", value_parser = parse_bool_arg,
              conflicts_with = "move_to")]
        delete: bool,

        /// Move the artifacts into this directory as "<album> - <name>"
        #[arg(long, value_name = "DIR")]
        move_to: Option<PathBuf>,

        /// Only list the nonstandard artifacts
        #[arg(long, value_name = "BOOL", action = ArgAction::Set, num_args = 0..=1, default_value = "no",
              default_missing_value = "yes", value_parser = parse_bool_arg)]
        dry_run: bool,
    },

    /// Print the effective settings as TOML
    Config,
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// The beets database
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SubdirArgs {
    /// Name of the source library's subdirectory inside catalog paths
    #[arg(long)]
    pub source_subdir: Option<String>,

    /// Name of the converted library's subdirectory
    #[arg(long)]
    pub converted_subdir: Option<String>,
}

/// Parse a human yes/no token into a boolean.
pub fn parse_bool(value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "t" | "y" | "1" => Ok(true),
        "no" | "false" | "f" | "n" | "0" => Ok(false),
        _ => Err(Error::InvalidArgument(format!(
            "boolean value expected, got {value:?}"
        ))),
    }
}

fn parse_bool_arg(value: &str) -> Result<bool, String> {
    parse_bool(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests;
