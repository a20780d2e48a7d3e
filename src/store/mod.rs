//! Persistent store interface consumed by the content managers.
//!
//! Rows are untyped JSON objects keyed by an `"id"` string field. The managers
//! convert between rows and typed records through [`crate::content::Record`];
//! the store itself only knows about tables, ids, equality filters and
//! ordering.

mod error;
pub mod json_file;
mod lock;
pub mod memory;
mod query;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use lock::{TableGuard, TableLocks};
pub use memory::InMemoryStore;
pub use query::{Direction, Filter, FindMany, OrderBy};

use async_trait::async_trait;
use serde_json::{Map, Value};

/// A single table row.
pub type Row = Map<String, Value>;

/// Name of the identifier column every row carries.
pub const ID_FIELD: &str = "id";

/// Read the identifier of a row, if it has one.
#[must_use]
pub fn row_id(row: &Row) -> Option<&str> {
    row.get(ID_FIELD).and_then(Value::as_str)
}

/// Asynchronous relational-style store.
///
/// Implementations must make every single call atomic. Multi-step sequences
/// (read the max order, then insert) are made atomic by holding the guard
/// returned from [`Store::lock_table`] for the whole sequence.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new row. Fails with [`StoreError::AlreadyExists`] on an id clash.
    async fn insert(&self, table: &str, row: Row) -> Result<(), StoreError>;

    /// Merge `patch` into the row with the given id.
    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<(), StoreError>;

    /// Apply several patches. Backends that can write them in one step
    /// override this; the default applies them one after another.
    async fn update_many(&self, table: &str, patches: Vec<(String, Row)>) -> Result<(), StoreError> {
        for (id, patch) in patches {
            self.update(table, &id, patch).await?;
        }
        Ok(())
    }

    /// Delete a row. Returns whether it existed.
    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError>;

    /// Query rows, optionally filtered, ordered and limited.
    async fn find_many(&self, table: &str, query: FindMany) -> Result<Vec<Row>, StoreError>;

    /// First row matching the filter, in storage order.
    async fn find_first(&self, table: &str, filter: Filter) -> Result<Option<Row>, StoreError>;

    /// Acquire the write lock for a table.
    async fn lock_table(&self, table: &str) -> TableGuard;
}

/// Build a patch row from `(field, value)` pairs.
#[must_use]
pub fn patch<I, K>(fields: I) -> Row
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    fields.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
