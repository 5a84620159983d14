//! Copy album covers into the converted library and optionally embed them.
//!
//! Converted albums live at the same relative location as their source, with
//! the source subdirectory token swapped for the converted one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::picture::{Picture, PictureType};
use lofty::prelude::*;
use lofty::tag::Tag;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::library::{AlbumDirectory, COVER_FILE};
use crate::reconcile::PathTransform;

/// Writes cover art into a track's tags.
pub trait CoverEmbedder {
    fn embed(&self, track: &Path, cover: &[u8]) -> Result<()>;
}

/// Embeds covers with lofty, creating the primary tag when the file has none.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyEmbedder;

impl CoverEmbedder for LoftyEmbedder {
    fn embed(&self, track: &Path, cover: &[u8]) -> Result<()> {
        let embed_err = |source| Error::Embed {
            path: track.to_path_buf(),
            source,
        };

        let mut tagged = lofty::read_from_path(track).map_err(embed_err)?;
        let tag_type = tagged.primary_tag_type();
        let mut tag = tagged
            .remove(tag_type)
            .unwrap_or_else(|| Tag::new(tag_type));

        let mut picture = Picture::from_reader(&mut io::Cursor::new(cover)).map_err(embed_err)?;
        picture.set_pic_type(PictureType::CoverFront);
        picture.set_description(Some("Cover".to_string()));

        tag.remove_picture_type(PictureType::CoverFront);
        tag.push_picture(picture);
        tag.save_to_path(track, WriteOptions::default())
            .map_err(embed_err)?;

        debug!(track = %track.display(), "embedded cover");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CoverOptions {
    pub source_subdir: String,
    pub converted_subdir: String,
    /// Extension of the converted tracks that receive the embedded cover.
    pub track_extension: String,
    pub dry_run: bool,
    pub embed: bool,
}

/// Where `album` lives in the converted library.
pub fn converted_album_path(album: &AlbumDirectory, opts: &CoverOptions) -> PathBuf {
    let transform =
        PathTransform::identity().subdir(opts.source_subdir.as_str(), opts.converted_subdir.as_str());
    PathBuf::from(transform.apply(&album.path.to_string_lossy()))
}

fn converted_tracks(album: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut tracks: Vec<PathBuf> = fs::read_dir(album)
        .map_err(|e| Error::missing_dir(album, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|name| name.ends_with(&suffix))
        })
        .collect();
    tracks.sort();
    Ok(tracks)
}

/// Copy `cover.jpg` into every converted album that lacks it.
///
/// Each converted cover path that is missing is written to `out`. Returns
/// `true` when no cover is left missing: always the case after a real run,
/// and only when nothing was reported during a dry run.
pub fn copy_covers<W: Write, E: CoverEmbedder>(
    albums: &[AlbumDirectory],
    opts: &CoverOptions,
    embedder: &E,
    out: &mut W,
) -> Result<bool> {
    let mut clean = true;

    for album in albums {
        let converted = converted_album_path(album, opts);
        let converted_cover = converted.join(COVER_FILE);
        if converted_cover.is_file() {
            continue;
        }

        writeln!(out, "{}", converted_cover.display()).map_err(Error::Report)?;

        if opts.dry_run {
            clean = false;
            continue;
        }

        let source_cover = album.path.join(COVER_FILE);
        fs::copy(&source_cover, &converted_cover)
            .map_err(|e| Error::fs("copy", &source_cover, e))?;
        info!(to = %converted_cover.display(), "copied cover");

        if opts.embed {
            let cover =
                fs::read(&converted_cover).map_err(|e| Error::fs("read", &converted_cover, e))?;
            for track in converted_tracks(&converted, &opts.track_extension)? {
                embedder.embed(&track, &cover)?;
            }
        }
    }

    Ok(clean)
}
