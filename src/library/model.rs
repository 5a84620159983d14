use std::path::{Path, PathBuf};

/// Name of the cover image every album is expected to carry.
pub const COVER_FILE: &str = "cover.jpg";

/// An album folder, `<root>/<artist>/<album>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumDirectory {
    pub path: PathBuf,
}

impl AlbumDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The folder name, which beets sets to the album title.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

/// What counts as an artifact when sweeping an album folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactQuery {
    /// Files named `*.<ext>`.
    Extension(String),
    /// Every subdirectory.
    Directories,
}

impl ArtifactQuery {
    pub fn extension(ext: &str) -> Self {
        Self::Extension(ext.trim().trim_start_matches('.').to_string())
    }

    /// The canonical name of this kind of artifact in album `album`.
    pub fn canonical_name(&self, album: &str) -> String {
        match self {
            Self::Extension(ext) => format!("{album}.{ext}"),
            Self::Directories => album.to_string(),
        }
    }
}

/// A sidecar file (or folder) found inside an album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl ArtifactFile {
    /// The full file name, e.g. `weird.cue`.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// The file name without its extension, e.g. `weird`.
    pub fn base_name(&self) -> &str {
        if self.is_dir {
            return self.file_name();
        }
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    pub fn is_cover(&self) -> bool {
        !self.is_dir && self.file_name() == COVER_FILE
    }

    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }
}
