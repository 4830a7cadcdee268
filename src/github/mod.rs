//! GitHub integration
//!
//! This module provides the release directory client used to:
//! - Fetch the latest published release for a repository
//! - Download release assets and source tarballs

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{Release, ReleaseAsset};
