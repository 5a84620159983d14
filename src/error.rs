//! Error type shared by every subcommand.
//!
//! Discrepancies found by an audit are not errors; they are reported on stdout
//! and only affect the exit code. Everything here aborts the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("catalog unavailable at {path}: {source}")]
    CatalogUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("directory not found or unreadable: {path}: {source}")]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to {op} {path}: {source}")]
    FileSystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to embed cover into {path}: {source}")]
    Embed {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("failed to render settings: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("failed to write report: {0}")]
    Report(#[source] io::Error),
}

impl Error {
    pub(crate) fn fs(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileSystem {
            op,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DirectoryNotFound {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
