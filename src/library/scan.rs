use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

use super::model::{AlbumDirectory, ArtifactFile, ArtifactQuery};

fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| Error::missing_dir(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::missing_dir(dir, e))?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

/// List every `<root>/<artist>/<album>` folder.
///
/// Each artist-level entry must be a readable directory; anything else aborts
/// the listing. Plain files at album level are not albums and are skipped.
pub fn list_album_directories(root: &Path) -> Result<Vec<AlbumDirectory>> {
    let mut albums = Vec::new();

    for artist in sorted_entries(root)? {
        let artist_path = artist.path();
        for album in sorted_entries(&artist_path)? {
            let path = album.path();
            if path.is_dir() {
                albums.push(AlbumDirectory::new(path));
            } else {
                debug!(path = %path.display(), "skipping non-directory album entry");
            }
        }
    }

    debug!(root = %root.display(), albums = albums.len(), "listed albums");
    Ok(albums)
}

fn matches_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn walker(root: &Path, follow_links: bool) -> Result<WalkDir> {
    if !root.is_dir() {
        let source = fs::metadata(root)
            .err()
            .unwrap_or_else(|| std::io::Error::other("not a directory"));
        return Err(Error::missing_dir(root, source));
    }
    Ok(WalkDir::new(root)
        .follow_links(follow_links)
        .min_depth(1)
        .sort_by_file_name())
}

fn ok_entries(walk: WalkDir) -> impl Iterator<Item = walkdir::DirEntry> {
    walk.into_iter().filter_map(|entry| match entry {
        Ok(e) => Some(e),
        Err(e) => {
            warn!("skipping unreadable entry: {e}");
            None
        }
    })
}

/// Recursively collect every track under `root` whose extension is one of
/// `extensions` (case-insensitive, with or without the dot), in walk order.
pub fn list_library_tracks(
    root: &Path,
    extensions: &[String],
    follow_links: bool,
) -> Result<Vec<PathBuf>> {
    let exts = normalize_extensions(extensions);

    let tracks: Vec<PathBuf> = ok_entries(walker(root, follow_links)?)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| matches_extension(p, &exts))
        .collect();

    debug!(root = %root.display(), tracks = tracks.len(), "walked library");
    Ok(tracks)
}

/// Recursively collect the artifacts below `folder` that match `query`.
///
/// `folder` may be a single album or a whole library. Directories are listed
/// deepest first so they can be removed in order.
pub fn list_folder_artifacts(folder: &Path, query: &ArtifactQuery) -> Result<Vec<ArtifactFile>> {
    let artifacts: Vec<ArtifactFile> = match query {
        ArtifactQuery::Directories => {
            ok_entries(walker(folder, false)?.contents_first(true))
                .filter(|e| e.file_type().is_dir())
                .map(|e| ArtifactFile {
                    path: e.into_path(),
                    is_dir: true,
                })
                .collect()
        }
        ArtifactQuery::Extension(ext) => {
            let suffix = format!(".{ext}");
            ok_entries(walker(folder, false)?)
                .filter(|e| e.file_type().is_file())
                .filter(|e| {
                    e.file_name()
                        .to_str()
                        .is_some_and(|name| name.ends_with(&suffix))
                })
                .map(|e| ArtifactFile {
                    path: e.into_path(),
                    is_dir: false,
                })
                .collect()
        }
    };
    Ok(artifacts)
}
