//! GitHub API type definitions

use serde::{Deserialize, Serialize};

/// A published release, as returned by the latest-release endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    /// Default source archive for the tagged commit.
    pub tarball_url: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A named file attached to a release, downloadable by direct URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}
