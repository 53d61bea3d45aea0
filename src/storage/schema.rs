//! Database schema and connection management

use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::core::cache_root;

/// Database connection manager for the forecast journal
pub struct ForecastDatabase {
    pub(crate) conn: Connection,
}

impl ForecastDatabase {
    /// Open (or create) the journal in the cache directory
    pub fn new() -> Result<Self> {
        Self::open(&Self::database_path())
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Create an in-memory database (tests and `--no-save` runs)
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Get the path to the database file
    pub fn database_path() -> PathBuf {
        cache_root().join("forecasts.db")
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS forecasts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id INTEGER NOT NULL,
                player_name TEXT NOT NULL,
                opponent TEXT NOT NULL,
                season INTEGER NOT NULL,
                stat TEXT NOT NULL,
                prediction REAL NOT NULL,
                expectation REAL NOT NULL,
                verdict TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_forecasts_player
             ON forecasts(player_id, created_at)",
            [],
        )?;

        Ok(())
    }
}
