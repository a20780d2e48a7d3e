use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-table write locks.
///
/// Holds no row data, only one mutex per table name so that read-then-write
/// sequences against the same table run one at a time.
#[derive(Debug, Default)]
pub struct TableLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TableLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the lock of `table`.
    pub async fn acquire(&self, table: &str) -> TableGuard {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(table.to_string()).or_default())
        };
        TableGuard {
            table: table.to_string(),
            _guard: lock.lock_owned().await,
        }
    }
}

/// Held while a multi-step sequence runs against one table.
#[derive(Debug)]
pub struct TableGuard {
    table: String,
    _guard: OwnedMutexGuard<()>,
}

impl TableGuard {
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }
}
