//! # `taskboard`
//!
//! Client for a task-management REST API: an observable task store with
//! filtering and persisted preferences, form validation, and a gateway over
//! the `/tasks` and `/categories` resources.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod paths;
pub mod storage;
pub mod tasks;
pub mod templates;
pub mod testing;
pub mod traits;
pub mod transport;
pub mod validators;

pub use error::{Error, Result};
pub use tasks::{TaskState, TaskStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
