//! GitHub API client implementation

use crate::config::Config;
use crate::di::traits::ReleaseProvider;
use crate::error::{GrmError, GrmResult};
use crate::github::types::Release;
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Client for the GitHub REST API and release downloads.
///
/// Holds its own `reqwest::Client` rather than reaching for a shared
/// global, so tests can point `api_url` at a local mock server.
pub struct GitHubClient {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: &Config) -> GrmResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("grm-release-fetcher"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.github.timeout_secs))
            .build()
            .map_err(|e| GrmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.github.api_url.clone(),
        })
    }

    /// Get the latest published release for a repository
    pub async fn latest_release(&self, owner: &str, repo: &str) -> GrmResult<Release> {
        let url = format!("{}/repos/{}/{}/releases/latest", self.api_url, owner, repo);
        debug!(%url, "querying latest release");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| GrmError::ReleaseLookup {
                source: Box::new(e),
            })?;

        // GitHub answers 404 when a repository has no published releases
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GrmError::NoReleaseFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        }

        let response = response
            .error_for_status()
            .map_err(|e| GrmError::ReleaseLookup {
                source: Box::new(e),
            })?;

        response.json().await.map_err(|e| GrmError::ReleaseLookup {
            source: Box::new(e),
        })
    }

    /// Stream a download URL into a local file, creating or truncating it.
    ///
    /// On failure the partially written file is left on disk; the next
    /// invocation overwrites it.
    pub async fn download(&self, url: &str, dest: &Path) -> GrmResult<()> {
        debug!(%url, dest = %dest.display(), "downloading");

        let mut file = File::create(dest).await.map_err(|e| GrmError::Download {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        let mut response = self
            .http_client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| GrmError::Download {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        while let Some(chunk) = response.chunk().await.map_err(|e| GrmError::Download {
            url: url.to_string(),
            source: Box::new(e),
        })? {
            file.write_all(&chunk)
                .await
                .map_err(|e| GrmError::Download {
                    url: url.to_string(),
                    source: Box::new(e),
                })?;
        }

        file.flush().await.map_err(|e| GrmError::Download {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }
}

#[async_trait]
impl ReleaseProvider for GitHubClient {
    async fn latest_release(&self, owner: &str, repo: &str) -> GrmResult<Release> {
        Self::latest_release(self, owner, repo).await
    }

    async fn download(&self, url: &str, dest: &Path) -> GrmResult<()> {
        Self::download(self, url, dest).await
    }
}
