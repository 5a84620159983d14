//! Set difference over path strings.
//!
//! Both sides are compared as exact strings, after an optional rewrite of the
//! upstream side so that paths from one library line up with another.

use std::collections::HashSet;

/// Rewrites an upstream path into its expected downstream form.
///
/// The subdirectory substitution replaces every occurrence of the source token,
/// so a token that also appears elsewhere in a path (an artist named `FLAC`)
/// gets rewritten there too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTransform {
    subdir: Option<(String, String)>,
}

impl PathTransform {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Replace the `from` subdirectory token with `to`.
    pub fn subdir(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.subdir = Some((from.into(), to.into()));
        self
    }

    pub fn apply(&self, path: &str) -> String {
        match &self.subdir {
            Some((from, to)) if !from.is_empty() => path.replace(from.as_str(), to),
            _ => path.to_string(),
        }
    }
}

/// Every element of `upstream`, after `transform`, that is absent from `downstream`.
///
/// Upstream order is preserved and each missing path is reported once.
pub fn difference<F>(upstream: &[String], downstream: &[String], transform: F) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    let present: HashSet<&str> = downstream.iter().map(String::as_str).collect();
    let mut seen: HashSet<String> = HashSet::new();

    upstream
        .iter()
        .map(|p| transform(p.as_str()))
        .filter(|p| !present.contains(p.as_str()))
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// Replace the extension of the final path component.
///
/// Only the last dot counts, and leading dots of a file name (`.hidden`) are
/// not an extension. A path without an extension gets one appended.
pub fn replace_extension(path: &str, ext: &str) -> String {
    let ext = ext.trim_start_matches('.');
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    let name = &path[name_start..];
    let leading_dots = name.len() - name.trim_start_matches('.').len();

    let stem_end = name[leading_dots..]
        .rfind('.')
        .map_or(path.len(), |i| name_start + leading_dots + i);

    format!("{}.{}", &path[..stem_end], ext)
}
