//! Common test utilities

#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use kcic_cms::store::{Filter, FindMany, Row, Store, StoreError, TableGuard};
use kcic_cms::{ContentActions, InMemoryStore, RecordingRevalidator, Revalidator};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Store wrapper that counts every write call reaching the inner store.
pub struct CountingStore<S> {
    inner: S,
    writes: AtomicUsize,
}

impl<S: Store> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            writes: AtomicUsize::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn record(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<S: Store> Store for CountingStore<S> {
    async fn insert(&self, table: &str, row: Row) -> Result<(), StoreError> {
        self.record();
        self.inner.insert(table, row).await
    }

    async fn update(&self, table: &str, id: &str, patch: Row) -> Result<(), StoreError> {
        self.record();
        self.inner.update(table, id, patch).await
    }

    async fn update_many(&self, table: &str, patches: Vec<(String, Row)>) -> Result<(), StoreError> {
        self.record();
        self.inner.update_many(table, patches).await
    }

    async fn delete(&self, table: &str, id: &str) -> Result<bool, StoreError> {
        self.record();
        self.inner.delete(table, id).await
    }

    async fn find_many(&self, table: &str, query: FindMany) -> Result<Vec<Row>, StoreError> {
        self.inner.find_many(table, query).await
    }

    async fn find_first(&self, table: &str, filter: Filter) -> Result<Option<Row>, StoreError> {
        self.inner.find_first(table, filter).await
    }

    async fn lock_table(&self, table: &str) -> TableGuard {
        self.inner.lock_table(table).await
    }
}

/// Actions over `store` with a revalidator that records every path.
pub fn actions_over(store: Arc<dyn Store>) -> (ContentActions, Arc<RecordingRevalidator>) {
    let recorder = Arc::new(RecordingRevalidator::new());
    let revalidator: Arc<dyn Revalidator> = recorder.clone();
    (ContentActions::new(store, revalidator), recorder)
}

/// Actions over a fresh in-memory store.
pub fn memory_actions() -> (ContentActions, Arc<RecordingRevalidator>) {
    actions_over(Arc::new(InMemoryStore::new()))
}

pub fn statistic(label: &str, value: i64) -> Value {
    json!({ "label": label, "value": value })
}

pub fn article(title: &str) -> Value {
    json!({
        "title": title,
        "excerpt": "A short summary of the story.",
        "body": "Innovators from across the region gathered in Nairobi.",
    })
}

/// `id` of the record in a successful result.
pub fn id_of(data: Option<&Value>) -> String {
    data.and_then(|d| d["id"].as_str())
        .expect("result carries a record id")
        .to_string()
}

/// `order` values of a listed collection, in list order.
pub fn orders_of(data: Option<&Value>) -> Vec<u64> {
    data.and_then(Value::as_array)
        .expect("result carries a list")
        .iter()
        .map(|r| r["order"].as_u64().expect("order is a number"))
        .collect()
}
