//! Ordered Collection Manager.
//!
//! Keeps the `order` column of an ordered content table contiguous: after
//! every successful append or remove the orders of an N-record collection are
//! exactly `0..N`. Each read-then-write sequence runs under the store's table
//! lock, so concurrent admin edits against the same collection serialize.

mod reorder;

pub use reorder::{check_permutation, ReorderItem, ReorderPolicy};

use crate::content::{OrderedRecord, ORDER_FIELD};
use crate::error::ContentError;
use crate::store::{patch, Filter, FindMany, OrderBy, Row, Store, ID_FIELD};
use crate::utils::new_id;
use crate::validation::{Validate, ValidationErrors};
use serde_json::json;
use std::marker::PhantomData;
use tracing::{debug, info};

/// Manager for one ordered table, borrowed per request.
pub struct OrderedCollection<'a, T> {
    store: &'a dyn Store,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: OrderedRecord> OrderedCollection<'a, T> {
    #[must_use]
    pub fn new(store: &'a dyn Store) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    fn table() -> &'static str {
        T::KIND.table()
    }

    fn decode(rows: Vec<Row>) -> Result<Vec<T>, ContentError> {
        rows.into_iter()
            .map(|row| T::from_row(row).map_err(ContentError::from))
            .collect()
    }

    /// Every record, by ascending order.
    pub async fn list(&self) -> Result<Vec<T>, ContentError> {
        let rows = self
            .store
            .find_many(Self::table(), FindMany::ordered_by(OrderBy::asc(ORDER_FIELD)))
            .await?;
        Self::decode(rows)
    }

    pub async fn get(&self, id: &str) -> Result<T, ContentError> {
        let row = self
            .store
            .find_first(Self::table(), Filter::new().eq(ID_FIELD, id))
            .await?
            .ok_or_else(|| ContentError::not_found(T::KIND, id))?;
        Ok(T::from_row(row)?)
    }

    /// Insert a record after the current last one.
    ///
    /// The new order is `max(order) + 1`, or `0` for an empty collection.
    pub async fn append(&self, input: T::Input) -> Result<T, ContentError> {
        input.validate()?;
        let _guard = self.store.lock_table(Self::table()).await;

        let existing = Self::decode(self.store.find_many(Self::table(), FindMany::all()).await?)?;
        let next = match existing.iter().map(OrderedRecord::order).max() {
            None => 0,
            Some(max) => max.checked_add(1).ok_or_else(|| {
                ValidationErrors::single(
                    ORDER_FIELD,
                    format!("no order above {max} is available; reorder the collection first"),
                )
            })?,
        };

        let record = T::from_input(new_id(), next, input);
        self.store.insert(Self::table(), record.to_row()?).await?;
        info!(kind = %T::KIND, id = %record.id(), order = next, "Appended record");
        Ok(record)
    }

    /// Replace a record's business fields, keeping its id and position.
    pub async fn update(&self, id: &str, input: T::Input) -> Result<T, ContentError> {
        input.validate()?;
        let _guard = self.store.lock_table(Self::table()).await;

        let mut record = self.get(id).await?;
        record.apply(input);
        self.store
            .update(Self::table(), id, record.to_row()?)
            .await
            .map_err(|e| ContentError::from_store(T::KIND, e))?;
        info!(kind = %T::KIND, id, "Updated record");
        Ok(record)
    }

    /// Delete a record and close the gap it leaves.
    ///
    /// Existence is checked before anything is deleted. The remaining records
    /// keep their relative sequence and are renumbered `0..N-1` in one batch.
    pub async fn remove(&self, id: &str) -> Result<T, ContentError> {
        let _guard = self.store.lock_table(Self::table()).await;

        let removed = self.get(id).await?;
        if !self.store.delete(Self::table(), id).await? {
            return Err(ContentError::not_found(T::KIND, id));
        }

        let remaining = self.list().await?;
        let patches: Vec<(String, Row)> = remaining
            .iter()
            .zip(0_u32..)
            .filter(|(record, index)| record.order() != *index)
            .map(|(record, index)| {
                (
                    record.id().to_string(),
                    patch([(ORDER_FIELD, json!(index))]),
                )
            })
            .collect();

        debug!(kind = %T::KIND, renumbered = patches.len(), "Compacting order");
        if !patches.is_empty() {
            self.store
                .update_many(Self::table(), patches)
                .await
                .map_err(|e| ContentError::from_store(T::KIND, e))?;
        }
        info!(kind = %T::KIND, id, remaining = remaining.len(), "Removed record");
        Ok(removed)
    }

    /// Apply caller-supplied positions.
    ///
    /// Under [`ReorderPolicy::Strict`] the request must cover the whole
    /// collection with orders `0..N`; under [`ReorderPolicy::Trusting`] each
    /// listed record simply takes the order it was given.
    pub async fn reorder(
        &self,
        items: &[ReorderItem],
        policy: ReorderPolicy,
    ) -> Result<(), ContentError> {
        items.validate()?;
        let _guard = self.store.lock_table(Self::table()).await;

        if policy == ReorderPolicy::Strict {
            let current = self.list().await?;
            let ids: Vec<&str> = current.iter().map(|r| r.id()).collect();
            check_permutation(items, &ids)?;
        }

        let patches: Vec<(String, Row)> = items
            .iter()
            .map(|item| (item.id.clone(), patch([(ORDER_FIELD, json!(item.order))])))
            .collect();
        if !patches.is_empty() {
            self.store
                .update_many(Self::table(), patches)
                .await
                .map_err(|e| ContentError::from_store(T::KIND, e))?;
        }
        info!(kind = %T::KIND, count = items.len(), %policy, "Reordered records");
        Ok(())
    }
}
