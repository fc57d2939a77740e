//! SQLite-backed store for the word catalog and analysis history.
//!
//! Provides persistent storage for:
//! - Categorized words (`words`)
//! - Category metadata (`categories`)
//! - Word-to-word relationships (`word_relationships`, reserved)
//! - Append-only analysis history (`analysis_results`)

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Connection;
use tracing::debug;

use super::{data_dir, migrations};
use crate::error::{DatabaseError, Result};

/// File name of the store inside the data directory.
pub const DEFAULT_DB_FILE: &str = "wordwise.db";

/// SQLite database handle shared by the catalog and the analysis history.
///
/// Opened once and passed explicitly to every component that needs it.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Location of the backing file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Open the database at `~/.config/wordwise/wordwise.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join(DEFAULT_DB_FILE);
        Self::open_at(path)
    }

    /// Open (or create) the database at an explicit path.
    ///
    /// Missing parent directories and tables are created. An existing file
    /// that is not a valid SQLite database is reported as an error.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, is corrupt, or a
    /// migration fails.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;

        let db = Self {
            conn,
            path: Some(path.clone()),
        };
        db.create_base_tables()
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn, path: None };
        db.create_base_tables().map_err(DatabaseError::from)?;
        db.migrate()?;
        Ok(db)
    }

    fn create_base_tables(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS words (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                word              TEXT UNIQUE NOT NULL,
                category          TEXT NOT NULL,
                subcategory       TEXT,
                efficiency_impact REAL NOT NULL DEFAULT 0.0,
                is_efficient      INTEGER NOT NULL DEFAULT 1,
                created_at        TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at        TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS categories (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT UNIQUE NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                polarity    TEXT NOT NULL DEFAULT 'neutral'
                            CHECK(polarity IN ('positive', 'negative', 'neutral')),
                priority    INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS word_relationships (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                word1_id          INTEGER,
                word2_id          INTEGER,
                relationship_type TEXT,
                strength          REAL DEFAULT 1.0,
                FOREIGN KEY (word1_id) REFERENCES words (id),
                FOREIGN KEY (word2_id) REFERENCES words (id)
            );

            CREATE TABLE IF NOT EXISTS analysis_results (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                query_text       TEXT NOT NULL,
                efficiency_score REAL NOT NULL,
                flagged_words    TEXT NOT NULL DEFAULT '[]',
                suggestions      TEXT NOT NULL DEFAULT '[]',
                analyzed_at      TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );

            -- Indexes for the catalog's lookup and reporting paths
            CREATE INDEX IF NOT EXISTS idx_words_category ON words(category);
            CREATE INDEX IF NOT EXISTS idx_words_efficient ON words(is_efficient);
            CREATE INDEX IF NOT EXISTS idx_words_impact ON words(efficiency_impact);",
        )
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        debug!(
            version = migrations::CURRENT_VERSION,
            "database schema up to date"
        );
        Ok(())
    }
}

/// Parse a stored timestamp.
///
/// Rows written by this crate hold RFC 3339 strings; rows written through
/// SQLite's `CURRENT_TIMESTAMP` default hold `YYYY-MM-DD HH:MM:SS` in UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(db: &Database) -> Vec<String> {
        let mut stmt = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn open_memory_creates_all_tables() {
        let db = Database::open_memory().unwrap();
        let tables = table_names(&db);
        for expected in [
            "analysis_results",
            "categories",
            "schema_version",
            "word_relationships",
            "words",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
        assert!(db.path().is_none());
    }

    #[test]
    fn open_at_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("store.db");
        let db = Database::open_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), Some(path.as_path()));
    }

    #[test]
    fn reopening_existing_store_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.conn()
                .execute(
                    "INSERT INTO words (word, category) VALUES ('some', 'vague_quantifiers')",
                    [],
                )
                .unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.db");
        std::fs::write(&path, "not a sqlite database\n".repeat(256)).unwrap();
        assert!(Database::open_at(&path).is_err());
    }

    #[test]
    fn parse_timestamp_accepts_both_formats() {
        let rfc = parse_timestamp("2025-03-04T05:06:07+00:00").unwrap();
        let sqlite = parse_timestamp("2025-03-04 05:06:07").unwrap();
        assert_eq!(rfc, sqlite);
        assert!(parse_timestamp("yesterday").is_none());
    }
}
