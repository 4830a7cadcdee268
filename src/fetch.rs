//! The fetch workflow
//!
//! Resolves an `owner/repo` identifier, queries the latest release,
//! compares its tag against the locally recorded marker, downloads the
//! selected artifact, and records the new tag. Linear and synchronous:
//! every step completes (or fails) before the next begins, and the first
//! failure aborts the run.

use crate::di::traits::{ReleaseProvider, Reporter};
use crate::error::{GrmError, GrmResult};
use crate::github::types::Release;
use crate::tag_store::TagStore;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// A repository identifier of the form `owner/name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoId {
    type Err = GrmError;

    /// Split on `/`; anything other than exactly two parts is malformed.
    /// Empty parts are tolerated, matching the upstream shorthand rules.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();

        if parts.len() != 2 {
            return Err(GrmError::MalformedIdentifier(s.to_string()));
        }

        Ok(Self {
            owner: parts[0].to_string(),
            name: parts[1].to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What to fetch and where to put it
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    /// Repository identifier string, `owner/repo`
    pub repo: String,
    /// Release asset to download; absent or empty selects the source
    /// tarball
    pub asset: Option<String>,
    /// Output path; absent or empty derives one from the download URL
    pub output: Option<PathBuf>,
}

/// Orchestrates a single release fetch
pub struct Fetcher {
    provider: Arc<dyn ReleaseProvider>,
    reporter: Arc<dyn Reporter>,
    tags: TagStore,
    request: FetchRequest,
}

impl Fetcher {
    /// Create a fetcher for one pre-configured request
    pub fn new(
        provider: Arc<dyn ReleaseProvider>,
        reporter: Arc<dyn Reporter>,
        tags: TagStore,
        request: FetchRequest,
    ) -> Self {
        Self {
            provider,
            reporter,
            tags,
            request,
        }
    }

    /// Run the fetch workflow, short-circuiting on the first failure.
    ///
    /// The tag marker is written only after the download completes, so an
    /// interrupted fetch is retried in full on the next invocation. A
    /// failed download leaves the partial output file on disk.
    pub async fn fetch(&self) -> GrmResult<()> {
        let id: RepoId = self.request.repo.parse()?;

        let release = self.provider.latest_release(&id.owner, &id.name).await?;
        debug!(repo = %id, tag = %release.tag_name, "latest release");

        self.check_tag(&id, &release.tag_name)?;

        let download_url = self.resolve_download_url(&release)?;
        let output = self.resolve_output_path(download_url);

        self.reporter.report(&format!(
            "Downloading '{}' to {}...",
            download_url,
            output.display()
        ));

        self.provider.download(download_url, &output).await?;

        self.tags.write(&id.owner, &id.name, &release.tag_name)?;

        self.reporter.report("Done.");

        Ok(())
    }

    /// Fail with `AlreadyUpToDate` when the marker already records `tag`
    fn check_tag(&self, id: &RepoId, tag: &str) -> GrmResult<()> {
        match self.tags.read(&id.owner, &id.name) {
            Some(recorded) if recorded == tag => Err(GrmError::AlreadyUpToDate {
                tag: tag.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Select the download URL: the named asset when one was requested,
    /// the source tarball otherwise. Assets are scanned in release order
    /// and the first name match wins.
    fn resolve_download_url<'a>(&self, release: &'a Release) -> GrmResult<&'a str> {
        match self.request.asset.as_deref() {
            None | Some("") => Ok(release.tarball_url.as_str()),
            Some(name) => release
                .assets
                .iter()
                .find(|asset| asset.name == name)
                .map(|asset| asset.browser_download_url.as_str())
                .ok_or_else(|| GrmError::AssetNotFound {
                    name: name.to_string(),
                }),
        }
    }

    /// Use the requested output path, or everything after the final `/`
    /// of the download URL
    fn resolve_output_path(&self, download_url: &str) -> PathBuf {
        match self.request.output.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
            _ => {
                let tail = download_url.rsplit('/').next().unwrap_or(download_url);
                PathBuf::from(tail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::mocks::{MemoryReporter, MockReleaseProvider};
    use crate::github::types::ReleaseAsset;
    use std::fs;
    use tempfile::TempDir;

    const TARBALL_URL: &str = "http://github.com/release/tarball.tar";
    const ASSET_URL: &str = "http://github.com/release/asset.file";

    fn sample_release() -> Release {
        Release {
            tag_name: "tag0".to_string(),
            tarball_url: TARBALL_URL.to_string(),
            assets: vec![ReleaseAsset {
                name: "A".to_string(),
                browser_download_url: ASSET_URL.to_string(),
            }],
        }
    }

    fn fetcher(request: FetchRequest, tags: TagStore) -> Fetcher {
        Fetcher::new(
            Arc::new(MockReleaseProvider::new()),
            Arc::new(MemoryReporter::new()),
            tags,
            request,
        )
    }

    fn fetcher_for_request(request: FetchRequest) -> Fetcher {
        fetcher(request, TagStore::new(".grm"))
    }

    #[test]
    fn parses_owner_and_repo_from_shorthand() {
        let id: RepoId = "kowala-tech/kUSD".parse().unwrap();
        assert_eq!(id.owner, "kowala-tech");
        assert_eq!(id.name, "kUSD");
    }

    #[test]
    fn rejects_shorthand_without_a_separator() {
        assert!(matches!(
            "too-short".parse::<RepoId>(),
            Err(GrmError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn rejects_shorthand_with_extra_separators() {
        assert!(matches!(
            "a/b/c".parse::<RepoId>(),
            Err(GrmError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn resolves_the_tarball_when_no_asset_is_requested() {
        let f = fetcher_for_request(FetchRequest {
            repo: "owner/repo".to_string(),
            ..Default::default()
        });

        let release = sample_release();
        let url = f.resolve_download_url(&release).unwrap();
        assert_eq!(url, TARBALL_URL);
    }

    #[test]
    fn an_empty_asset_name_selects_the_tarball() {
        let f = fetcher_for_request(FetchRequest {
            repo: "owner/repo".to_string(),
            asset: Some(String::new()),
            ..Default::default()
        });

        let release = sample_release();
        let url = f.resolve_download_url(&release).unwrap();
        assert_eq!(url, TARBALL_URL);
    }

    #[test]
    fn resolves_an_asset_url_by_name() {
        let f = fetcher_for_request(FetchRequest {
            repo: "owner/repo".to_string(),
            asset: Some("A".to_string()),
            ..Default::default()
        });

        let release = sample_release();
        let url = f.resolve_download_url(&release).unwrap();
        assert_eq!(url, ASSET_URL);
    }

    #[test]
    fn a_missing_asset_fails_with_its_name() {
        let f = fetcher_for_request(FetchRequest {
            repo: "owner/repo".to_string(),
            asset: Some("missing".to_string()),
            ..Default::default()
        });

        match f.resolve_download_url(&sample_release()) {
            Err(GrmError::AssetNotFound { name }) => assert_eq!(name, "missing"),
            other => panic!("expected AssetNotFound, got {:?}", other),
        }
    }

    #[test]
    fn derives_the_output_path_from_the_download_url() {
        let f = fetcher_for_request(FetchRequest {
            repo: "owner/repo".to_string(),
            ..Default::default()
        });

        assert_eq!(
            f.resolve_output_path("http://test.com/asset.file"),
            PathBuf::from("asset.file")
        );
    }

    #[test]
    fn a_requested_output_path_wins_over_derivation() {
        let f = fetcher_for_request(FetchRequest {
            repo: "owner/repo".to_string(),
            output: Some(PathBuf::from("my-output.file")),
            ..Default::default()
        });

        assert_eq!(
            f.resolve_output_path("http://test.com/asset.file"),
            PathBuf::from("my-output.file")
        );
    }

    #[test]
    fn a_matching_marker_aborts_with_already_up_to_date() {
        let temp = TempDir::new().unwrap();
        let tags = TagStore::new(temp.path());
        tags.write("owner", "repo", "tag0").unwrap();

        let f = fetcher(
            FetchRequest {
                repo: "owner/repo".to_string(),
                ..Default::default()
            },
            tags,
        );
        let id: RepoId = "owner/repo".parse().unwrap();

        assert!(matches!(
            f.check_tag(&id, "tag0"),
            Err(GrmError::AlreadyUpToDate { .. })
        ));
        assert!(f.check_tag(&id, "tag1").is_ok());
    }

    #[tokio::test]
    async fn a_full_fetch_downloads_and_records_the_tag() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("output.file");

        let provider = MockReleaseProvider::new();
        provider.add_release("owner", "repo", sample_release());
        provider.add_download(ASSET_URL, b"ASSET".to_vec());

        let reporter = MemoryReporter::new();
        let f = Fetcher::new(
            Arc::new(provider),
            Arc::new(reporter.clone()),
            TagStore::new(temp.path().join(".grm")),
            FetchRequest {
                repo: "owner/repo".to_string(),
                asset: Some("A".to_string()),
                output: Some(output.clone()),
            },
        );

        f.fetch().await.unwrap();

        assert_eq!(fs::read(&output).unwrap(), b"ASSET");
        assert_eq!(
            fs::read_to_string(temp.path().join(".grm/owner/repo")).unwrap(),
            "tag0"
        );
        assert_eq!(reporter.messages().last().map(String::as_str), Some("Done."));
    }

    #[tokio::test]
    async fn a_failed_download_leaves_no_marker() {
        let temp = TempDir::new().unwrap();

        // Release is known but no payload is registered for its asset
        let provider = MockReleaseProvider::new();
        provider.add_release("owner", "repo", sample_release());

        let f = Fetcher::new(
            Arc::new(provider),
            Arc::new(MemoryReporter::new()),
            TagStore::new(temp.path().join(".grm")),
            FetchRequest {
                repo: "owner/repo".to_string(),
                asset: Some("A".to_string()),
                output: Some(temp.path().join("output.file")),
            },
        );

        assert!(matches!(
            f.fetch().await,
            Err(GrmError::Download { .. })
        ));
        assert!(!temp.path().join(".grm/owner/repo").exists());
    }

    #[tokio::test]
    async fn an_unknown_repository_fails_with_no_release_found() {
        let temp = TempDir::new().unwrap();

        let f = Fetcher::new(
            Arc::new(MockReleaseProvider::new()),
            Arc::new(MemoryReporter::new()),
            TagStore::new(temp.path()),
            FetchRequest {
                repo: "owner/repo".to_string(),
                ..Default::default()
            },
        );

        assert!(matches!(
            f.fetch().await,
            Err(GrmError::NoReleaseFound { .. })
        ));
    }
}
