//! Publishing manager for slug-addressed content (news and opportunities).

use crate::content::SluggableRecord;
use crate::error::ContentError;
use crate::slug::{base_slug, ensure_unique, SLUG_FIELD};
use crate::store::{Filter, FindMany, Row, Store, ID_FIELD};
use crate::utils::{new_id, now};
use crate::validation::Validate;
use std::cmp::Reverse;
use std::marker::PhantomData;
use tracing::info;

/// An updated record together with the slug it held before the update.
#[derive(Debug, Clone)]
pub struct Revision<T> {
    pub record: T,
    pub previous_slug: String,
}

pub struct Publisher<'a, T> {
    store: &'a dyn Store,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: SluggableRecord> Publisher<'a, T> {
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

    async fn find(&self, filter: Filter) -> Result<Option<T>, ContentError> {
        self.store
            .find_first(Self::table(), filter)
            .await?
            .map(|row| T::from_row(row).map_err(ContentError::from))
            .transpose()
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<T>, ContentError> {
        let rows = self.store.find_many(Self::table(), FindMany::all()).await?;
        let mut records = rows
            .into_iter()
            .map(T::from_row)
            .collect::<Result<Vec<T>, _>>()?;
        // Stored timestamps are RFC 3339 strings with varying precision, so
        // sort on the parsed values rather than in the store.
        records.sort_by_key(|r| Reverse(r.created_at()));
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<T, ContentError> {
        self.find(Filter::new().eq(ID_FIELD, id))
            .await?
            .ok_or_else(|| ContentError::not_found(T::KIND, id))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<T, ContentError> {
        self.find(Filter::new().eq(SLUG_FIELD, slug))
            .await?
            .ok_or_else(|| ContentError::not_found(T::KIND, slug))
    }

    /// Create a record with a fresh id and a slug no other row uses.
    pub async fn create(&self, input: T::Input) -> Result<T, ContentError> {
        input.validate()?;
        let id = new_id();
        let base = base_slug(T::input_title(&input), &id);

        let _guard = self.store.lock_table(Self::table()).await;
        let slug = ensure_unique(self.store, Self::table(), &base, None).await?;
        let record = T::from_input(id, slug, input, now());
        self.store.insert(Self::table(), record.to_row()?).await?;

        info!(kind = %T::KIND, id = %record.id(), slug = %record.slug(), "Created record");
        Ok(record)
    }

    /// Replace the editable fields of a record.
    ///
    /// The slug is recomputed only when the title changed; any other edit
    /// keeps it, so published URLs stay stable.
    /// Replace a record's fields, reslugging only when the title changed.
    ///
    /// The previous slug is read under the same table lock as the write.
    pub async fn update(&self, id: &str, input: T::Input) -> Result<Revision<T>, ContentError> {
        input.validate()?;
        let _guard = self.store.lock_table(Self::table()).await;

        let mut record = self.get(id).await?;
        let new_title = T::input_title(&input);
        let slug = if new_title == record.title() {
            record.slug().to_string()
        } else {
            let base = base_slug(new_title, id);
            ensure_unique(self.store, Self::table(), &base, Some(id)).await?
        };

        let previous_slug = record.slug().to_string();
        let reslugged = slug != previous_slug;
        record.apply(slug, input, now());
        let row: Row = record.to_row()?;
        self.store
            .update(Self::table(), id, row)
            .await
            .map_err(|e| ContentError::from_store(T::KIND, e))?;

        info!(kind = %T::KIND, id, slug = %record.slug(), reslugged, "Updated record");
        Ok(Revision {
            record,
            previous_slug,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<T, ContentError> {
        let _guard = self.store.lock_table(Self::table()).await;
        let record = self.get(id).await?;
        if !self.store.delete(Self::table(), id).await? {
            return Err(ContentError::not_found(T::KIND, id));
        }
        info!(kind = %T::KIND, id, slug = %record.slug(), "Deleted record");
        Ok(record)
    }
}
