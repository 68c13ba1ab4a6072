//! `SQLite`-based durable slot storage.
//!
//! Preference slots (currently only the persisted task filter) live in a
//! single `slots` table at `~/.taskboard/preferences.sqlite3`.

use crate::error::Result;
use crate::paths;
use crate::traits::SlotStore;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// SQLite-based slot store.
///
/// Each operation opens a new connection to the database file, so the store
/// holds no connection and can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct SqliteSlotStore {
    /// Path to the database file.
    db_path: PathBuf,
}

impl SqliteSlotStore {
    /// Create a slot store inside the given data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_data_dir(data_dir: &Path) -> Result<Self> {
        Self::with_path(paths::preferences_path(data_dir))
    }

    /// Create a slot store with a specific database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn with_path(db_path: PathBuf) -> Result<Self> {
        let store = Self { db_path };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }
}

impl SlotStore for SqliteSlotStore {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let conn = self.open()?;
        let value = conn
            .query_row("SELECT value FROM slots WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
