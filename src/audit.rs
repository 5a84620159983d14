//! Read-only audits. Each returns the discrepancies it found; an empty result
//! means the library is consistent.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::{list_catalog_paths, list_catalog_tracks};
use crate::error::Result;
use crate::library::{AlbumDirectory, list_library_tracks};
use crate::reconcile::{PathTransform, difference};

/// Albums that do not contain a file named `artifact`.
pub fn missing_artifacts(albums: &[AlbumDirectory], artifact: &str) -> Vec<PathBuf> {
    albums
        .iter()
        .filter(|album| !album.path.join(artifact).exists())
        .map(|album| album.path.clone())
        .collect()
}

/// Where and how to compare the catalog against a library on disk.
#[derive(Debug, Clone)]
pub struct TrackAudit<'a> {
    pub catalog: &'a Path,
    pub library: &'a Path,
    /// Extensions of the tracks collected from the library.
    pub extensions: &'a [String],
    /// When set, catalog paths are rewritten to this extension before comparing.
    pub rewrite_extension: Option<&'a str>,
    pub follow_links: bool,
}

fn path_strings(paths: Vec<PathBuf>) -> Vec<String> {
    paths
        .into_iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}

fn catalog_minus_library(audit: &TrackAudit<'_>, transform: PathTransform) -> Result<Vec<String>> {
    let catalog = match audit.rewrite_extension {
        Some(ext) => list_catalog_tracks(audit.catalog, ext)?,
        None => list_catalog_paths(audit.catalog)?,
    };
    let library = path_strings(list_library_tracks(
        audit.library,
        audit.extensions,
        audit.follow_links,
    )?);

    let missing = difference(&catalog, &library, |p| transform.apply(p));
    debug!(
        catalog = catalog.len(),
        library = library.len(),
        missing = missing.len(),
        "compared catalog with library"
    );
    Ok(missing)
}

/// Catalog tracks that are not present in the library they were imported to.
pub fn missing_catalog_tracks(audit: &TrackAudit<'_>) -> Result<Vec<String>> {
    catalog_minus_library(audit, PathTransform::identity())
}

/// Catalog tracks with no transcoded counterpart in the converted library.
///
/// Catalog paths get the rewrite extension, if any, then `source_subdir` is
/// swapped for `converted_subdir`.
pub fn missing_converted_tracks(
    audit: &TrackAudit<'_>,
    source_subdir: &str,
    converted_subdir: &str,
) -> Result<Vec<String>> {
    catalog_minus_library(
        audit,
        PathTransform::identity().subdir(source_subdir, converted_subdir),
    )
}
