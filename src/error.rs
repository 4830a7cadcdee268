use std::path::PathBuf;
use thiserror::Error;

pub type GrmResult<T> = Result<T, GrmError>;

#[derive(Error, Debug)]
pub enum GrmError {
    /// The repository identifier was not of the `owner/repo` form.
    #[error("Expected owner/repo format, got '{0}'")]
    MalformedIdentifier(String),

    /// Querying the release directory failed.
    #[error("Failed to look up the latest release: {source}")]
    ReleaseLookup {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The repository has no published releases.
    #[error("No release found for {owner}/{repo}")]
    NoReleaseFound { owner: String, repo: String },

    /// The local tag marker already records the latest release tag.
    ///
    /// A benign outcome, but modeled as an error so callers exit non-zero,
    /// matching the original CLI behavior.
    #[error("Already up to date ({tag}), nothing to download")]
    AlreadyUpToDate { tag: String },

    /// No asset in the release matched the requested name.
    #[error("Can't find '{name}' in release assets")]
    AssetNotFound { name: String },

    /// The download failed. A partially written file may remain on disk.
    #[error("Failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The tag marker could not be written after a successful download.
    #[error("Failed to write tag to {path}: {source}")]
    TagPersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error: unreadable config file or bad client settings.
    #[error("Configuration error: {0}")]
    Config(String),
}
