//! Memory handling logic

use crate::db::{memories, Database};
use crate::error::{CoreError, Result};
use crate::models::{Memory, MemoryInput};
use std::sync::Arc;

/// Memory handler for business logic
///
/// Every method is one unit of work against the store.
#[derive(Clone)]
pub struct MemoryHandler {
    db: Arc<Database>,
}

impl MemoryHandler {
    pub fn new(db: Arc<Database>) -> Self {
        MemoryHandler { db }
    }

    /// Persist a new memory
    pub async fn create(&self, input: MemoryInput) -> Result<Memory> {
        let memory = self
            .db
            .with_conn(move |conn| memories::insert_memory(conn, &input))
            .await?;
        tracing::info!("Created memory {}", memory.id.unwrap_or_default());
        Ok(memory)
    }

    pub async fn list(&self) -> Result<Vec<Memory>> {
        self.db.with_conn(memories::list_memories).await
    }

    pub async fn get(&self, id: i64) -> Result<Memory> {
        self.db
            .with_conn(move |conn| memories::get_memory(conn, id))
            .await?
            .ok_or(CoreError::NotFound("Memory"))
    }

    /// Replace title, content and category of an existing memory
    pub async fn update(&self, id: i64, input: MemoryInput) -> Result<Memory> {
        let memory = self
            .db
            .with_transaction(move |conn| {
                let mut memory =
                    memories::get_memory(conn, id)?.ok_or(CoreError::NotFound("Memory"))?;
                memory.apply(input);
                memories::update_memory(conn, &memory)?;
                Ok(memory)
            })
            .await?;
        tracing::info!("Updated memory {}", id);
        Ok(memory)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.db
            .with_transaction(move |conn| {
                let memory =
                    memories::get_memory(conn, id)?.ok_or(CoreError::NotFound("Memory"))?;
                memories::delete_memory(conn, &memory)
            })
            .await?;
        tracing::info!("Deleted memory {}", id);
        Ok(())
    }
}
