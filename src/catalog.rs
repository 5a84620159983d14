//! Read-only access to the beets catalog.
//!
//! beets keeps one row per track in the `items` table, with `path` stored as
//! raw bytes. Only that column is ever read.

use std::path::Path;

use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Error, Result};
use crate::reconcile::replace_extension;

const TRACK_PATHS_QUERY: &str = "SELECT path FROM items";

/// List every track path registered in the catalog, in the catalog's row order.
///
/// The connection is opened read-only and dropped before returning, on both
/// the success and the failure path.
pub fn list_catalog_paths(catalog: &Path) -> Result<Vec<String>> {
    let unavailable = |source| Error::CatalogUnavailable {
        path: catalog.to_path_buf(),
        source,
    };

    let conn = Connection::open_with_flags(
        catalog,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(unavailable)?;

    let paths = read_paths(&conn).map_err(unavailable)?;
    debug!(catalog = %catalog.display(), tracks = paths.len(), "read catalog");
    Ok(paths)
}

/// Like [`list_catalog_paths`], with each path's extension replaced by `extension`.
///
/// Used to compare the catalog against a library holding the same tracks in
/// another format.
pub fn list_catalog_tracks(catalog: &Path, extension: &str) -> Result<Vec<String>> {
    Ok(list_catalog_paths(catalog)?
        .iter()
        .map(|p| replace_extension(p, extension))
        .collect())
}

fn read_paths(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(TRACK_PATHS_QUERY)?;
    let rows = stmt.query_map([], |row| {
        let (bytes, ty) = match row.get_ref(0)? {
            ValueRef::Blob(b) => (b, Type::Blob),
            ValueRef::Text(b) => (b, Type::Text),
            other => {
                return Err(rusqlite::Error::InvalidColumnType(
                    0,
                    "path".to_string(),
                    other.data_type(),
                ));
            }
        };
        String::from_utf8(bytes.to_vec())
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, ty, Box::new(e)))
    })?;
    rows.collect()
}
