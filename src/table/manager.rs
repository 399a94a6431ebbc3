//! The keyed collection of running tables.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::game::entities::TableId;
use crate::game::errors::TableError;

use super::actor::{TableActor, TableHandle};
use super::config::TableConfig;

/// Creates, looks up, and closes tables. Cloning shares the collection.
#[derive(Clone, Default)]
pub struct TableManager {
    tables: Arc<RwLock<HashMap<TableId, TableHandle>>>,
}

impl TableManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the config, spawns the table's actor task, and registers
    /// its handle under a fresh id.
    pub async fn create_table(&self, config: TableConfig) -> Result<TableId, TableError> {
        config.validate()?;
        let table_id = Uuid::new_v4();
        let (actor, handle) = TableActor::new(table_id, config);
        self.tables.write().await.insert(table_id, handle);
        tokio::spawn(actor.run());
        log::info!("created table {table_id}");
        Ok(table_id)
    }

    pub async fn get_table(&self, table_id: TableId) -> Option<TableHandle> {
        self.tables.read().await.get(&table_id).cloned()
    }

    /// Stops the actor and forgets the handle. A next-hand timer still
    /// pending against the table finds nothing and does nothing.
    pub async fn close_table(&self, table_id: TableId) -> Result<(), TableError> {
        let removed = self.tables.write().await.remove(&table_id);
        if let Some(handle) = removed {
            handle.close().await?;
            log::info!("closed table {table_id}");
        }
        Ok(())
    }

    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }
}
