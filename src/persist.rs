//! Writes the harvested genre list to disk as pretty-printed JSON.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub const DEFAULT_OUTPUT_FILE: &str = "spotify-genres.json";
pub const DEFAULT_MIRROR_DIR: &str = "public";

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to serialize genre list: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Output path {0} has no file name")]
    NoFileName(PathBuf),
}

/// Where the genre list is written.
#[derive(Debug, Clone)]
pub struct OutputTargets {
    /// Always written.
    pub primary: PathBuf,
    /// Also receives a copy under the primary's file name, but only if the
    /// directory already exists.
    pub mirror_dir: Option<PathBuf>,
}

impl Default for OutputTargets {
    fn default() -> Self {
        Self {
            primary: PathBuf::from(DEFAULT_OUTPUT_FILE),
            mirror_dir: Some(PathBuf::from(DEFAULT_MIRROR_DIR)),
        }
    }
}

impl OutputTargets {
    pub fn new(primary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            mirror_dir: None,
        }
    }

    pub fn with_mirror_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mirror_dir = Some(dir.into());
        self
    }
}

/// Writes `genres` as an indented JSON array, in the given order.
///
/// Returns every path written. The write is not atomic.
pub fn save_genres(
    genres: &[String],
    targets: &OutputTargets,
) -> Result<Vec<PathBuf>, PersistError> {
    let json = serde_json::to_string_pretty(genres)?;
    let mut written = Vec::with_capacity(2);

    write_file(&targets.primary, &json)?;
    info!(path = %targets.primary.display(), genres = genres.len(), "Saved genre list");
    written.push(targets.primary.clone());

    if let Some(dir) = targets.mirror_dir.as_deref().filter(|d| d.is_dir()) {
        let file_name = targets
            .primary
            .file_name()
            .ok_or_else(|| PersistError::NoFileName(targets.primary.clone()))?;
        let mirror = dir.join(file_name);
        write_file(&mirror, &json)?;
        info!(path = %mirror.display(), "Mirrored genre list");
        written.push(mirror);
    }

    Ok(written)
}

fn write_file(path: &Path, contents: &str) -> Result<(), PersistError> {
    std::fs::write(path, contents).map_err(|e| PersistError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
