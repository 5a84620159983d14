//! Bring stray sidecar files in album folders into canonical shape.
//!
//! An artifact is canonical when its base name equals the album folder name.
//! Anything else is reported, then renamed, deleted or moved unless this is a
//! dry run. `cover.jpg` is never touched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::library::{AlbumDirectory, ArtifactFile, ArtifactQuery, list_folder_artifacts};

/// What to do with a nonstandard artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixPolicy {
    /// Rename to `<album>.<ext>` next to the original.
    Rename,
    /// Remove the file, or the empty directory.
    Delete,
    /// Move into `dest` as `<album> - <file name>`.
    Move { dest: PathBuf },
}

#[derive(Debug, Clone)]
pub struct FixOptions {
    pub query: ArtifactQuery,
    pub policy: FixPolicy,
    pub dry_run: bool,
}

/// Outcome of a sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixReport {
    pub nonstandard: Vec<PathBuf>,
    pub fixed: usize,
}

impl FixReport {
    /// A sweep is clean when nothing was left in a nonstandard state.
    pub fn is_clean(&self) -> bool {
        self.nonstandard.len() == self.fixed
    }

    fn merge(&mut self, other: FixReport) {
        self.nonstandard.extend(other.nonstandard);
        self.fixed += other.fixed;
    }
}

fn is_canonical(artifact: &ArtifactFile, album: &AlbumDirectory) -> bool {
    artifact.base_name() == album.name()
}

fn apply(artifact: &ArtifactFile, album: &AlbumDirectory, opts: &FixOptions) -> Result<()> {
    let from = &artifact.path;
    match &opts.policy {
        FixPolicy::Rename => {
            let to = artifact.dir().join(opts.query.canonical_name(album.name()));
            fs::rename(from, &to).map_err(|e| Error::fs("rename", from, e))?;
            info!(from = %from.display(), to = %to.display(), "renamed artifact");
        }
        FixPolicy::Delete => {
            let removed = if artifact.is_dir {
                fs::remove_dir(from)
            } else {
                fs::remove_file(from)
            };
            removed.map_err(|e| Error::fs("delete", from, e))?;
            info!(path = %from.display(), "deleted artifact");
        }
        FixPolicy::Move { dest } => {
            let to = dest.join(format!("{} - {}", album.name(), artifact.file_name()));
            move_path(from, &to)?;
            info!(from = %from.display(), to = %to.display(), "moved artifact");
        }
    }
    Ok(())
}

fn move_path(from: &Path, to: &Path) -> Result<()> {
    // Albums of the same name under different artists map to the same target.
    if fs::symlink_metadata(to).is_ok() {
        return Err(Error::fs(
            "move",
            from,
            io::Error::from(io::ErrorKind::AlreadyExists),
        ));
    }
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        // rename(2) cannot cross filesystems; copy plain files over instead.
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices && !from.is_dir() => {
            fs::copy(from, to).map_err(|e| Error::fs("copy", from, e))?;
            fs::remove_file(from).map_err(|e| Error::fs("delete", from, e))
        }
        Err(e) => Err(Error::fs("move", from, e)),
    }
}

/// Fix the artifacts of a single album, writing each nonstandard path to `out`.
pub fn fix_album<W: Write>(
    album: &AlbumDirectory,
    opts: &FixOptions,
    out: &mut W,
) -> Result<FixReport> {
    let mut report = FixReport::default();

    for artifact in list_folder_artifacts(&album.path, &opts.query)? {
        if artifact.is_cover() || is_canonical(&artifact, album) {
            continue;
        }

        writeln!(out, "{}", artifact.path.display()).map_err(Error::Report)?;
        report.nonstandard.push(artifact.path.clone());

        if opts.dry_run {
            debug!(path = %artifact.path.display(), "dry run, leaving artifact");
            continue;
        }

        apply(&artifact, album, opts)?;
        report.fixed += 1;
    }

    Ok(report)
}

/// Fix every album in turn.
///
/// Mutations are not transactional: an error stops the sweep and leaves the
/// albums already processed as they are.
pub fn fix_library<W: Write>(
    albums: &[AlbumDirectory],
    opts: &FixOptions,
    out: &mut W,
) -> Result<FixReport> {
    if let FixPolicy::Move { dest } = &opts.policy {
        if !opts.dry_run && !dest.is_dir() {
            let source = fs::metadata(dest)
                .err()
                .unwrap_or_else(|| io::Error::other("not a directory"));
            return Err(Error::missing_dir(dest, source));
        }
    }

    let mut report = FixReport::default();
    for album in albums {
        report.merge(fix_album(album, opts, out)?);
    }
    Ok(report)
}
