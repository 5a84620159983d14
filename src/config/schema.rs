use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/shelfcheck/config.toml` or `~/.config/shelfcheck/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `SHELFCHECK__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Root of the source library, laid out as `<artist>/<album>/<track>`.
    pub dir: PathBuf,
    /// Root of the transcoded copy of the library.
    pub converted_dir: PathBuf,
    /// Path token naming the source library inside catalog paths, e.g. `FLAC`.
    pub source_subdir: String,
    /// Path token that replaces `source_subdir` for the converted library, e.g. `V2`.
    pub converted_subdir: String,
    /// Extension (without dot) of the transcoded tracks.
    pub converted_extension: String,
    /// Extensions treated as tracks when walking a library.
    pub track_extensions: Vec<String>,
    /// Whether to follow symlinks while walking.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("~/media/Music/FLAC"),
            converted_dir: PathBuf::from("~/media/Music/V2"),
            source_subdir: "FLAC".to_string(),
            converted_subdir: "V2".to_string(),
            converted_extension: "mp3".to_string(),
            track_extensions: vec!["flac".into(), "mp3".into()],
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// The beets SQLite database.
    pub path: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("~/.config/beets/library.db"),
        }
    }
}
