//! In-memory store backend.

use super::{row_id, Filter, FindMany, Row, Store, StoreError, TableGuard, TableLocks};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Store that keeps every table in process memory.
///
/// Rows keep their insertion order, which is the "storage order" seen by
/// unordered queries.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    locks: TableLocks,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently in `table`.
    pub async fn len(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }
}

fn merge(row: &mut Row, patch: Row) {
    for (field, value) in patch {
        row.insert(field, value);
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn insert(&self, table: &str, row: Row) -> Result<(), StoreError> {
        let id = row_id(&row)
            .ok_or_else(|| StoreError::invalid_row(table, "missing string id"))?
            .to_string();
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        if rows.iter().any(|r| row_id(r) == Some(id.as_str())) {
            return Err(StoreError::AlreadyExists {
                table: table.to_string(),
                id,
            });
        }
        debug!(table, id = %id, "insert");
        rows.push(row);
        Ok(())
    }

    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| row_id(r) == Some(id)))
            .ok_or_else(|| StoreError::not_found(table, id))?;
        debug!(table, id, "update");
        merge(row, patch);
        Ok(())
    }

    async fn update_many(&self, table: &str, patches: Vec<(String, Row)>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();

        // All ids must exist before anything is touched.
        if let Some((missing, _)) = patches
            .iter()
            .find(|(id, _)| !rows.iter().any(|r| row_id(r) == Some(id.as_str())))
        {
            return Err(StoreError::not_found(table, missing));
        }

        debug!(table, count = patches.len(), "update_many");
        for (id, patch) in patches {
            if let Some(row) = rows.iter_mut().find(|r| row_id(r) == Some(id.as_str())) {
                merge(row, patch);
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|r| row_id(r) != Some(id));
        debug!(table, id, "delete");
        Ok(rows.len() != before)
    }

    async fn find_many(&self, table: &str, query: FindMany) -> Result<Vec<Row>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .map(|rows| query.apply(rows))
            .unwrap_or_default())
    }

    async fn find_first(&self, table: &str, filter: Filter) -> Result<Option<Row>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| filter.matches(r)))
            .cloned())
    }

    async fn lock_table(&self, table: &str) -> TableGuard {
        self.locks.acquire(table).await
    }
}
