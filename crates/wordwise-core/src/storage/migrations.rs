//! Database schema migrations for wordwise.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};
use tracing::{debug, warn};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const CURRENT_VERSION: i32 = 2;

/// Columns renamed since the first generation of the word store.
///
/// `(table, legacy column, current column)`
const LEGACY_RENAMES: &[(&str, &str, &str)] = &[
    ("categories", "impact_type", "polarity"),
    ("categories", "priority_level", "priority"),
    ("analysis_results", "inefficient_words", "flagged_words"),
];

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

/// Create the schema_version table if it doesn't exist.
fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

/// Set the schema version in the database.
fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> SqliteResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Migration v1: Initial schema (baseline).
///
/// The tables are created by `Database::create_base_tables()`; this only
/// records the version.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    set_schema_version(conn, 1)
}

/// Migration v2: Rename columns written by the first-generation word store.
///
/// - categories.impact_type -> polarity
/// - categories.priority_level -> priority
/// - analysis_results.inefficient_words -> flagged_words
///
/// Stores created by this crate already use the current names, so this is a
/// no-op for them.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    for (table, legacy, current) in LEGACY_RENAMES {
        if column_exists(&tx, table, legacy)? && !column_exists(&tx, table, current)? {
            debug!(table, legacy, current, "renaming legacy column");
            tx.execute_batch(&format!(
                "ALTER TABLE {table} RENAME COLUMN {legacy} TO {current};"
            ))?;
        }
    }

    set_schema_version(&tx, 2)?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Schema as written by the first-generation word store, which never
    /// tracked a schema version.
    fn create_legacy_schema(conn: &Connection) {
        conn.execute_batch(
            "CREATE TABLE words (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                word TEXT UNIQUE NOT NULL,
                category TEXT NOT NULL,
                subcategory TEXT,
                efficiency_impact REAL DEFAULT 0.0,
                frequency_rank INTEGER,
                is_efficient BOOLEAN DEFAULT 1,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL,
                description TEXT,
                impact_type TEXT CHECK(impact_type IN ('positive', 'negative', 'neutral')),
                priority_level INTEGER DEFAULT 0
            );
            CREATE TABLE analysis_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                query_text TEXT,
                efficiency_score REAL,
                inefficient_words TEXT,
                suggestions TEXT,
                analyzed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );",
        )
        .unwrap();
    }

    #[test]
    fn test_migrate_from_scratch() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), CURRENT_VERSION);
    }

    #[test]
    fn test_migrate_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_legacy_schema(&conn);

        migrate(&conn).unwrap();
        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn), CURRENT_VERSION);
    }

    #[test]
    fn test_legacy_columns_are_renamed() {
        let conn = Connection::open_in_memory().unwrap();
        create_legacy_schema(&conn);
        conn.execute(
            "INSERT INTO categories (name, description, impact_type, priority_level)
             VALUES ('vague_quantifiers', 'Imprecise quantity descriptors', 'negative', 1)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO analysis_results (query_text, efficiency_score, inefficient_words, suggestions)
             VALUES ('some text', 0.5, '[]', '[]')",
            [],
        )
        .unwrap();

        migrate(&conn).unwrap();

        assert!(column_exists(&conn, "categories", "polarity").unwrap());
        assert!(column_exists(&conn, "categories", "priority").unwrap());
        assert!(!column_exists(&conn, "categories", "impact_type").unwrap());
        assert!(column_exists(&conn, "analysis_results", "flagged_words").unwrap());

        let (polarity, priority): (String, i64) = conn
            .query_row(
                "SELECT polarity, priority FROM categories WHERE name = 'vague_quantifiers'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(polarity, "negative");
        assert_eq!(priority, 1);

        let flagged: String = conn
            .query_row("SELECT flagged_words FROM analysis_results", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(flagged, "[]");
    }

    #[test]
    fn test_incremental_migration() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY)",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])
            .unwrap();
        create_legacy_schema(&conn);

        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn), 2);
        assert!(column_exists(&conn, "categories", "polarity").unwrap());
    }
}
