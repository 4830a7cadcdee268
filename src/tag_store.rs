//! Tag marker persistence
//!
//! A tag marker records the tag of the last successfully fetched release
//! for a repository, as a plain-text file at `<work_dir>/<owner>/<repo>`
//! with the exact tag string as its content.
//!
//! Markers are written only after a download completes and are never
//! deleted. Concurrent invocations sharing a working directory have a
//! read-then-write race on the marker; this is a single-user CLI and the
//! store provides no locking.

use crate::error::{GrmError, GrmResult};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Stores per-repository tag markers under a working directory
#[derive(Debug, Clone)]
pub struct TagStore {
    work_dir: PathBuf,
}

impl TagStore {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Path of the marker file for a repository
    pub fn marker_path(&self, owner: &str, repo: &str) -> PathBuf {
        self.work_dir.join(owner).join(repo)
    }

    /// Read the recorded tag for a repository
    ///
    /// An absent or unreadable marker means "no tag recorded", not an
    /// error.
    pub fn read(&self, owner: &str, repo: &str) -> Option<String> {
        fs::read_to_string(self.marker_path(owner, repo)).ok()
    }

    /// Record a tag for a repository, overwriting any previous marker
    pub fn write(&self, owner: &str, repo: &str, tag: &str) -> GrmResult<()> {
        let path = self.marker_path(owner, repo);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GrmError::TagPersist {
                path: path.clone(),
                source: e,
            })?;
        }

        debug!(path = %path.display(), tag, "writing tag marker");

        fs::write(&path, tag).map_err(|e| GrmError::TagPersist { path, source: e })
    }
}
