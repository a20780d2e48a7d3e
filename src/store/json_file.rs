//! File-backed store: one JSON array per table under a data directory.
//!
//! Every write rewrites the whole table file through [`atomic_write_json`], so a
//! batch passed to [`Store::update_many`] lands in a single replacement.

use super::{row_id, Filter, FindMany, Row, Store, StoreError, TableGuard, TableLocks};
use crate::utils::atomic_write_json;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    io: Mutex<()>,
    locks: TableLocks,
}

impl JsonFileStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await?;
        debug!(data_dir = %data_dir.display(), "Opened JSON file store");
        Ok(Self {
            data_dir,
            io: Mutex::new(()),
            locks: TableLocks::new(),
        })
    }

    fn table_path(&self, table: &str) -> Result<PathBuf, StoreError> {
        let valid = !table.is_empty()
            && table
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            return Err(StoreError::invalid_row(table, "invalid table name"));
        }
        Ok(self.data_dir.join(format!("{table}.json")))
    }

    async fn read_table(&self, table: &str) -> Result<Vec<Row>, StoreError> {
        let path = self.table_path(table)?;
        if !fs::try_exists(&path).await? {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_table(&self, table: &str, rows: &[Row]) -> Result<(), StoreError> {
        let path = self.table_path(table)?;
        let bytes = atomic_write_json(&path, rows).await?;
        debug!(table, rows = rows.len(), bytes, "Wrote table file");
        Ok(())
    }
}

fn merge(row: &mut Row, patch: Row) {
    for (field, value) in patch {
        row.insert(field, value);
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn insert(&self, table: &str, row: Row) -> Result<(), StoreError> {
        let id = row_id(&row)
            .ok_or_else(|| StoreError::invalid_row(table, "missing string id"))?
            .to_string();
        let _io = self.io.lock().await;
        let mut rows = self.read_table(table).await?;
        if rows.iter().any(|r| row_id(r) == Some(id.as_str())) {
            return Err(StoreError::AlreadyExists {
                table: table.to_string(),
                id,
            });
        }
        rows.push(row);
        self.write_table(table, &rows).await
    }

    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<(), StoreError> {
        let _io = self.io.lock().await;
        let mut rows = self.read_table(table).await?;
        let row = rows
            .iter_mut()
            .find(|r| row_id(r) == Some(id))
            .ok_or_else(|| StoreError::not_found(table, id))?;
        merge(row, patch);
        self.write_table(table, &rows).await
    }

    async fn update_many(&self, table: &str, patches: Vec<(String, Row)>) -> Result<(), StoreError> {
        let _io = self.io.lock().await;
        let mut rows = self.read_table(table).await?;
        for (id, patch) in patches {
            let row = rows
                .iter_mut()
                .find(|r| row_id(r) == Some(id.as_str()))
                .ok_or_else(|| StoreError::not_found(table, &id))?;
            merge(row, patch);
        }
        // Nothing reaches disk unless every patch applied.
        self.write_table(table, &rows).await
    }

    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        let _io = self.io.lock().await;
        let mut rows = self.read_table(table).await?;
        let before = rows.len();
        rows.retain(|r| row_id(r) != Some(id));
        if rows.len() == before {
            return Ok(false);
        }
        self.write_table(table, &rows).await?;
        Ok(true)
    }

    async fn find_many(&self, table: &str, query: FindMany) -> Result<Vec<Row>, StoreError> {
        let _io = self.io.lock().await;
        let rows = self.read_table(table).await?;
        Ok(query.apply(&rows))
    }

    async fn find_first(&self, table: &str, filter: Filter) -> Result<Option<Row>, StoreError> {
        let _io = self.io.lock().await;
        let rows = self.read_table(table).await?;
        Ok(rows.into_iter().find(|r| filter.matches(r)))
    }

    async fn lock_table(&self, table: &str) -> TableGuard {
        self.locks.acquire(table).await
    }
}
