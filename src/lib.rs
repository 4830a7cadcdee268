//! grm — GitHub Release Manager
//!
//! Fetches the latest release asset (or source tarball) of a GitHub
//! project and writes it to local disk, skipping the download when the
//! locally recorded release tag already matches the remote latest tag.
//! Tag markers live under a working directory (`.grm` by default) as
//! `<work_dir>/<owner>/<repo>`.

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// Error types.
pub mod error;

/// The fetch workflow.
pub mod fetch;

/// GitHub API client and types.
pub mod github;

/// Tag marker persistence.
pub mod tag_store;

pub use config::Config;
pub use error::{GrmError, GrmResult};
pub use fetch::{FetchRequest, Fetcher, RepoId};
pub use github::GitHubClient;
pub use tag_store::TagStore;
