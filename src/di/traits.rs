//! Trait definitions for dependency injection

use crate::error::GrmResult;
use crate::github::types::Release;
use async_trait::async_trait;
use std::path::Path;

/// Trait for release directory and download operations
///
/// Production code talks to the GitHub API; tests substitute an
/// in-memory double. Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Get the latest published release for a repository
    async fn latest_release(&self, owner: &str, repo: &str) -> GrmResult<Release>;

    /// Stream a download URL into a local file
    async fn download(&self, url: &str, dest: &Path) -> GrmResult<()>;
}

/// Trait for human-readable progress reporting
pub trait Reporter: Send + Sync {
    /// Emit a progress message
    fn report(&self, message: &str);
}

/// Reporter that prints to stdout
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, message: &str) {
        println!("{}", message);
    }
}
