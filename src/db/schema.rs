//! SQLite schema for Lumina
//!
//! A single `memories` table. There is no migration layer; the table is
//! created on first startup and left alone afterwards.

use rusqlite::{Connection, Result};

/// Initialize the database with required tables
///
/// Safe to call more than once.
pub fn init_db(conn: &Connection) -> Result<()> {
    // AUTOINCREMENT keeps ids unique even after the highest row is deleted
    conn.execute(
        "CREATE TABLE IF NOT EXISTS memories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'General',
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}
