//! Row-level operations on the `memories` table
//!
//! These take a plain `&Connection` so they can run inside either
//! [`Database::with_conn`](super::Database::with_conn) or
//! [`Database::with_transaction`](super::Database::with_transaction).

use crate::error::{CoreError, Result};
use crate::models::{Memory, MemoryInput};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

const MEMORY_COLUMNS: &str = "id, title, content, category, created_at";

fn row_to_memory(row: &Row<'_>) -> rusqlite::Result<Memory> {
    Ok(Memory {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        content: row.get(2)?,
        category: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Insert a new memory and return it as stored
pub fn insert_memory(conn: &Connection, input: &MemoryInput) -> Result<Memory> {
    conn.execute(
        "INSERT INTO memories (title, content, category, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![input.title, input.content, input.category, Utc::now()],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!("Inserted memory {}", id);

    get_memory(conn, id)?.ok_or(CoreError::NotFound("Memory"))
}

/// All memories in insertion order
pub fn list_memories(conn: &Connection) -> Result<Vec<Memory>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM memories ORDER BY id ASC",
        MEMORY_COLUMNS
    ))?;

    let memories = stmt
        .query_map([], row_to_memory)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(memories)
}

/// Look up a memory by id. A missing id is `Ok(None)`.
pub fn get_memory(conn: &Connection, id: i64) -> Result<Option<Memory>> {
    let memory = conn
        .query_row(
            &format!("SELECT {} FROM memories WHERE id = ?1", MEMORY_COLUMNS),
            [id],
            row_to_memory,
        )
        .optional()?;

    Ok(memory)
}

/// Write back the mutable fields of a loaded memory
pub fn update_memory(conn: &Connection, memory: &Memory) -> Result<()> {
    let id = memory.id.ok_or(CoreError::NotFound("Memory"))?;

    let changed = conn.execute(
        "UPDATE memories SET title = ?1, content = ?2, category = ?3 WHERE id = ?4",
        params![memory.title, memory.content, memory.category, id],
    )?;
    if changed == 0 {
        return Err(CoreError::NotFound("Memory"));
    }

    tracing::debug!("Updated memory {}", id);
    Ok(())
}

/// Remove a loaded memory
pub fn delete_memory(conn: &Connection, memory: &Memory) -> Result<()> {
    let id = memory.id.ok_or(CoreError::NotFound("Memory"))?;

    let changed = conn.execute("DELETE FROM memories WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(CoreError::NotFound("Memory"));
    }

    tracing::debug!("Deleted memory {}", id);
    Ok(())
}
