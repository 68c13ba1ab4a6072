//! Path utilities for determining data storage locations.
//!
//! All client-side state lives in `~/.taskboard/`: the YAML config file and
//! the `SQLite` database holding durable preference slots.

use std::path::{Path, PathBuf};

/// The base directory name for taskboard data.
const DATA_DIR_NAME: &str = ".taskboard";

/// The preferences database filename.
pub const PREFERENCES_FILENAME: &str = "preferences.sqlite3";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Get the base data directory.
///
/// Returns `~/.taskboard/` or `None` if the home directory cannot be
/// determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the preferences database path inside a data directory.
#[must_use]
pub fn preferences_path(data_dir: &Path) -> PathBuf {
    data_dir.join(PREFERENCES_FILENAME)
}

/// Get the config file path inside a data directory.
#[must_use]
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILENAME)
}
