use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::artifacts::{FixOptions, FixPolicy, fix_library};
use crate::audit::{TrackAudit, missing_artifacts, missing_catalog_tracks, missing_converted_tracks};
use crate::cli::{Command, SubdirArgs};
use crate::config::{Settings, expand_home};
use crate::covers::{CoverOptions, LoftyEmbedder, copy_covers};
use crate::error::{Error, Result};
use crate::library::{ArtifactQuery, list_album_directories};

/// Whether a subcommand left anything to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    Discrepancies,
}

impl Outcome {
    fn from_clean(clean: bool) -> Self {
        if clean { Self::Clean } else { Self::Discrepancies }
    }
}

fn absolutize(path: &Path) -> PathBuf {
    let path = expand_home(path);
    std::path::absolute(&path).unwrap_or(path)
}

fn resolve_path(flag: Option<PathBuf>, fallback: &Path) -> PathBuf {
    absolutize(flag.as_deref().unwrap_or(fallback))
}

fn resolve_subdirs(args: SubdirArgs, settings: &Settings) -> (String, String) {
    (
        args.source_subdir
            .unwrap_or_else(|| settings.library.source_subdir.clone()),
        args.converted_subdir
            .unwrap_or_else(|| settings.library.converted_subdir.clone()),
    )
}

fn report<W: Write, T: std::fmt::Display>(out: &mut W, lines: &[T]) -> Result<Outcome> {
    for line in lines {
        writeln!(out, "{line}").map_err(Error::Report)?;
    }
    Ok(Outcome::from_clean(lines.is_empty()))
}

/// Run one subcommand, writing its report to `out`.
pub fn execute<W: Write>(command: Command, settings: &Settings, out: &mut W) -> Result<Outcome> {
    let lib = &settings.library;

    match command {
        Command::MissingArtifacts { dir, artifact } => {
            let root = resolve_path(dir, &lib.dir);
            let albums = list_album_directories(&root)?;
            let missing: Vec<_> = missing_artifacts(&albums, &artifact)
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            report(out, &missing)
        }

        Command::MissingCatalogTracks { catalog, dir, ext } => {
            let db = resolve_path(catalog.db, &settings.catalog.path);
            let root = resolve_path(dir, &lib.dir);
            let extensions = match &ext {
                Some(ext) => vec![ext.clone()],
                None => lib.track_extensions.clone(),
            };
            let audit = TrackAudit {
                catalog: &db,
                library: &root,
                extensions: &extensions,
                rewrite_extension: ext.as_deref(),
                follow_links: lib.follow_links,
            };
            report(out, &missing_catalog_tracks(&audit)?)
        }

        Command::MissingConvertedTracks {
            catalog,
            dir,
            subdirs,
            ext,
        } => {
            let db = resolve_path(catalog.db, &settings.catalog.path);
            let root = resolve_path(dir, &lib.converted_dir);
            let (source, converted) = resolve_subdirs(subdirs, settings);
            let ext = ext.unwrap_or_else(|| lib.converted_extension.clone());
            let extensions = [ext.clone()];
            let audit = TrackAudit {
                catalog: &db,
                library: &root,
                extensions: &extensions,
                rewrite_extension: Some(&ext),
                follow_links: lib.follow_links,
            };
            report(out, &missing_converted_tracks(&audit, &source, &converted)?)
        }

        Command::CopyCovers {
            dir,
            subdirs,
            dry_run,
            embed,
        } => {
            let root = resolve_path(dir, &lib.dir);
            let (source_subdir, converted_subdir) = resolve_subdirs(subdirs, settings);
            let opts = CoverOptions {
                source_subdir,
                converted_subdir,
                track_extension: lib.converted_extension.clone(),
                dry_run,
                embed,
            };
            let albums = list_album_directories(&root)?;
            let clean = copy_covers(&albums, &opts, &LoftyEmbedder, out)?;
            Ok(Outcome::from_clean(clean))
        }

        Command::FixArtifacts {
            dir,
            ext,
            directories,
            delete,
            move_to,
            dry_run,
        } => {
            let root = resolve_path(dir, &lib.dir);
            let query = if directories {
                ArtifactQuery::Directories
            } else {
                ArtifactQuery::extension(&ext)
            };
            let policy = match (delete, move_to) {
                (true, _) => FixPolicy::Delete,
                (false, Some(dest)) => FixPolicy::Move {
                    dest: absolutize(&dest),
                },
                (false, None) => FixPolicy::Rename,
            };
            let opts = FixOptions {
                query,
                policy,
                dry_run,
            };
            let albums = list_album_directories(&root)?;
            let fixed = fix_library(&albums, &opts, out)?;
            info!(
                nonstandard = fixed.nonstandard.len(),
                fixed = fixed.fixed,
                "artifact sweep finished"
            );
            Ok(Outcome::from_clean(fixed.is_clean()))
        }

        Command::Config => {
            write!(out, "{}", toml::to_string_pretty(settings)?).map_err(Error::Report)?;
            Ok(Outcome::Clean)
        }
    }
}
