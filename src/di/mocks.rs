//! Mock implementations of service traits for testing

use super::traits::{ReleaseProvider, Reporter};
use crate::error::{GrmError, GrmResult};
use crate::github::types::Release;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock release provider for testing
///
/// Allows pre-populating releases and download payloads for deterministic
/// testing without network access.
///
/// # Example
///
/// ```
/// use grm::di::mocks::MockReleaseProvider;
///
/// let provider = MockReleaseProvider::new();
/// provider.add_download("https://example.com/asset.file", b"ASSET".to_vec());
/// ```
#[derive(Clone, Default)]
pub struct MockReleaseProvider {
    releases: Arc<Mutex<HashMap<String, Release>>>,
    downloads: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockReleaseProvider {
    /// Create a new mock release provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the latest release for an `owner/repo` pair
    pub fn add_release(&self, owner: &str, repo: &str, release: Release) {
        self.releases
            .lock()
            .unwrap()
            .insert(format!("{}/{}", owner, repo), release);
    }

    /// Register the payload served for a download URL
    pub fn add_download(&self, url: &str, body: Vec<u8>) {
        self.downloads.lock().unwrap().insert(url.to_string(), body);
    }
}

#[async_trait]
impl ReleaseProvider for MockReleaseProvider {
    async fn latest_release(&self, owner: &str, repo: &str) -> GrmResult<Release> {
        self.releases
            .lock()
            .unwrap()
            .get(&format!("{}/{}", owner, repo))
            .cloned()
            .ok_or_else(|| GrmError::NoReleaseFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            })
    }

    async fn download(&self, url: &str, dest: &Path) -> GrmResult<()> {
        let body = self
            .downloads
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| GrmError::Download {
                url: url.to_string(),
                source: "no payload registered for URL".into(),
            })?;

        std::fs::write(dest, body).map_err(|e| GrmError::Download {
            url: url.to_string(),
            source: Box::new(e),
        })
    }
}

/// Reporter that collects messages in memory
#[derive(Clone, Default)]
pub struct MemoryReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemoryReporter {
    /// Create a new memory reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages reported so far, in order
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
