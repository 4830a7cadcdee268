//! Dependency injection infrastructure

pub mod mocks;
pub mod traits;

pub use traits::{ConsoleReporter, ReleaseProvider, Reporter};
