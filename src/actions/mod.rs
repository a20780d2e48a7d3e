//! Action boundary between callers and the content managers.
//!
//! Every entry point takes raw JSON input, runs validation and the matching
//! manager, signals revalidation after a successful mutation and folds any
//! failure into an [`ActionResult`]. No error escapes this module.

mod result;

pub use result::ActionResult;

use crate::content::{
    ContentKind, FooterLink, HeroButton, NewsArticle, Opportunity, OrderedRecord, Partner,
    SluggableRecord, SocialLink, Statistic, TeamMember,
};
use crate::error::{ContentError, ToErrorCode};
use crate::metrics::{generate_request_id, OperationTimer};
use crate::ordering::{OrderedCollection, ReorderItem, ReorderPolicy};
use crate::publishing::{Publisher, Revision};
use crate::revalidate::{paths_for, Revalidator};
use crate::store::{Store, StoreError};
use crate::validation::deserialize_input;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Payload of a successful action and the slugs it touched.
struct Outcome {
    data: Option<Value>,
    slugs: Vec<String>,
}

impl Outcome {
    fn ordered<T: Serialize>(record: &T) -> Result<Self, ContentError> {
        Ok(Self {
            data: Some(to_value(record)?),
            slugs: Vec::new(),
        })
    }

    fn sluggable<T: Serialize>(record: &T, slugs: Vec<String>) -> Result<Self, ContentError> {
        Ok(Self {
            data: Some(to_value(record)?),
            slugs,
        })
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, ContentError> {
    serde_json::to_value(value).map_err(|e| ContentError::Store(StoreError::from(e)))
}

/// Resolve a kind name (table name or alias) for callers holding strings.
pub fn parse_kind(name: &str) -> Result<ContentKind, ContentError> {
    name.parse()
        .map_err(|_| ContentError::UnknownKind(name.to_string()))
}

/// Entry points for every content operation.
#[derive(Clone)]
pub struct ContentActions {
    store: Arc<dyn Store>,
    revalidator: Arc<dyn Revalidator>,
    policy: ReorderPolicy,
}

impl ContentActions {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, revalidator: Arc<dyn Revalidator>) -> Self {
        Self {
            store,
            revalidator,
            policy: ReorderPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_reorder_policy(mut self, policy: ReorderPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn reorder_policy(&self) -> ReorderPolicy {
        self.policy
    }

    #[must_use]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    #[instrument(
        name = "action.list",
        skip(self),
        fields(request_id = %generate_request_id())
    )]
    pub async fn list(&self, kind: ContentKind) -> ActionResult {
        let mut timer = OperationTimer::new("list", kind);
        let result = match kind {
            ContentKind::HeroButton => self.list_ordered::<HeroButton>().await,
            ContentKind::Statistic => self.list_ordered::<Statistic>().await,
            ContentKind::TeamMember => self.list_ordered::<TeamMember>().await,
            ContentKind::Partner => self.list_ordered::<Partner>().await,
            ContentKind::FooterLink => self.list_ordered::<FooterLink>().await,
            ContentKind::SocialLink => self.list_ordered::<SocialLink>().await,
            ContentKind::NewsArticle => self.list_published::<NewsArticle>().await,
            ContentKind::Opportunity => self.list_published::<Opportunity>().await,
        };
        self.finish(&mut timer, result.map(|data| Outcome { data, slugs: Vec::new() }), false)
            .await
    }

    #[instrument(
        name = "action.get",
        skip(self),
        fields(request_id = %generate_request_id())
    )]
    pub async fn get(&self, kind: ContentKind, id: &str) -> ActionResult {
        let mut timer = OperationTimer::new("get", kind);
        let result = match kind {
            ContentKind::HeroButton => self.get_ordered::<HeroButton>(id).await,
            ContentKind::Statistic => self.get_ordered::<Statistic>(id).await,
            ContentKind::TeamMember => self.get_ordered::<TeamMember>(id).await,
            ContentKind::Partner => self.get_ordered::<Partner>(id).await,
            ContentKind::FooterLink => self.get_ordered::<FooterLink>(id).await,
            ContentKind::SocialLink => self.get_ordered::<SocialLink>(id).await,
            ContentKind::NewsArticle => self.get_published::<NewsArticle>(id).await,
            ContentKind::Opportunity => self.get_published::<Opportunity>(id).await,
        };
        self.finish(&mut timer, result, false).await
    }

    /// Look up a news article or opportunity by its public slug.
    #[instrument(
        name = "action.get_by_slug",
        skip(self),
        fields(request_id = %generate_request_id())
    )]
    pub async fn get_by_slug(&self, kind: ContentKind, slug: &str) -> ActionResult {
        let mut timer = OperationTimer::new("get_by_slug", kind);
        let result = match kind {
            ContentKind::NewsArticle => self.find_slug::<NewsArticle>(slug).await,
            ContentKind::Opportunity => self.find_slug::<Opportunity>(slug).await,
            _ => Err(ContentError::Unsupported {
                kind,
                operation: "lookup by slug",
            }),
        };
        self.finish(&mut timer, result, false).await
    }

    #[instrument(
        name = "action.create",
        skip(self, input),
        fields(request_id = %generate_request_id())
    )]
    pub async fn create(&self, kind: ContentKind, input: Value) -> ActionResult {
        let mut timer = OperationTimer::new("create", kind);
        let result = match kind {
            ContentKind::HeroButton => self.append::<HeroButton>(input).await,
            ContentKind::Statistic => self.append::<Statistic>(input).await,
            ContentKind::TeamMember => self.append::<TeamMember>(input).await,
            ContentKind::Partner => self.append::<Partner>(input).await,
            ContentKind::FooterLink => self.append::<FooterLink>(input).await,
            ContentKind::SocialLink => self.append::<SocialLink>(input).await,
            ContentKind::NewsArticle => self.publish::<NewsArticle>(input).await,
            ContentKind::Opportunity => self.publish::<Opportunity>(input).await,
        };
        self.finish(&mut timer, result, true).await
    }

    #[instrument(
        name = "action.update",
        skip(self, input),
        fields(request_id = %generate_request_id())
    )]
    pub async fn update(&self, kind: ContentKind, id: &str, input: Value) -> ActionResult {
        let mut timer = OperationTimer::new("update", kind);
        let result = match kind {
            ContentKind::HeroButton => self.update_ordered::<HeroButton>(id, input).await,
            ContentKind::Statistic => self.update_ordered::<Statistic>(id, input).await,
            ContentKind::TeamMember => self.update_ordered::<TeamMember>(id, input).await,
            ContentKind::Partner => self.update_ordered::<Partner>(id, input).await,
            ContentKind::FooterLink => self.update_ordered::<FooterLink>(id, input).await,
            ContentKind::SocialLink => self.update_ordered::<SocialLink>(id, input).await,
            ContentKind::NewsArticle => self.update_published::<NewsArticle>(id, input).await,
            ContentKind::Opportunity => self.update_published::<Opportunity>(id, input).await,
        };
        self.finish(&mut timer, result, true).await
    }

    #[instrument(
        name = "action.remove",
        skip(self),
        fields(request_id = %generate_request_id())
    )]
    pub async fn remove(&self, kind: ContentKind, id: &str) -> ActionResult {
        let mut timer = OperationTimer::new("remove", kind);
        let result = match kind {
            ContentKind::HeroButton => self.remove_ordered::<HeroButton>(id).await,
            ContentKind::Statistic => self.remove_ordered::<Statistic>(id).await,
            ContentKind::TeamMember => self.remove_ordered::<TeamMember>(id).await,
            ContentKind::Partner => self.remove_ordered::<Partner>(id).await,
            ContentKind::FooterLink => self.remove_ordered::<FooterLink>(id).await,
            ContentKind::SocialLink => self.remove_ordered::<SocialLink>(id).await,
            ContentKind::NewsArticle => self.delete_published::<NewsArticle>(id).await,
            ContentKind::Opportunity => self.delete_published::<Opportunity>(id).await,
        };
        self.finish(&mut timer, result, true).await
    }

    /// Apply a reorder request. `input` is a JSON array of `{id, order}`.
    #[instrument(
        name = "action.reorder",
        skip(self, input),
        fields(request_id = %generate_request_id(), policy = %self.policy)
    )]
    pub async fn reorder(&self, kind: ContentKind, input: Value) -> ActionResult {
        let mut timer = OperationTimer::new("reorder", kind);
        let result = match kind {
            ContentKind::HeroButton => self.reorder_ordered::<HeroButton>(input).await,
            ContentKind::Statistic => self.reorder_ordered::<Statistic>(input).await,
            ContentKind::TeamMember => self.reorder_ordered::<TeamMember>(input).await,
            ContentKind::Partner => self.reorder_ordered::<Partner>(input).await,
            ContentKind::FooterLink => self.reorder_ordered::<FooterLink>(input).await,
            ContentKind::SocialLink => self.reorder_ordered::<SocialLink>(input).await,
            ContentKind::NewsArticle | ContentKind::Opportunity => {
                Err(ContentError::Unsupported {
                    kind,
                    operation: "reorder",
                })
            }
        };
        self.finish(&mut timer, result, true).await
    }

    /// Fold an outcome into an [`ActionResult`], signalling revalidation
    /// for successful mutations only.
    async fn finish(
        &self,
        timer: &mut OperationTimer,
        result: Result<Outcome, ContentError>,
        mutating: bool,
    ) -> ActionResult {
        let kind = timer.kind();
        match result {
            Ok(mutation) => {
                timer.succeeded();
                if mutating {
                    let slugs: Vec<&str> = mutation.slugs.iter().map(String::as_str).collect();
                    self.revalidator.revalidate(&paths_for(kind, &slugs)).await;
                }
                ActionResult::ok(mutation.data)
            }
            Err(e) => {
                let (code, _) = e.error_code_and_tip();
                warn!(kind = %kind, code, error = %e, "Action failed");
                ActionResult::failed(&e)
            }
        }
    }

    async fn list_ordered<T: OrderedRecord>(&self) -> Result<Option<Value>, ContentError> {
        let records = OrderedCollection::<T>::new(self.store()).list().await?;
        Ok(Some(to_value(&records)?))
    }

    async fn list_published<T: SluggableRecord>(&self) -> Result<Option<Value>, ContentError> {
        let records = Publisher::<T>::new(self.store()).list().await?;
        Ok(Some(to_value(&records)?))
    }

    async fn get_ordered<T: OrderedRecord>(&self, id: &str) -> Result<Outcome, ContentError> {
        let record = OrderedCollection::<T>::new(self.store()).get(id).await?;
        Outcome::ordered(&record)
    }

    async fn get_published<T: SluggableRecord>(&self, id: &str) -> Result<Outcome, ContentError> {
        let record = Publisher::<T>::new(self.store()).get(id).await?;
        Outcome::sluggable(&record, Vec::new())
    }

    async fn find_slug<T: SluggableRecord>(&self, slug: &str) -> Result<Outcome, ContentError> {
        let record = Publisher::<T>::new(self.store()).get_by_slug(slug).await?;
        Outcome::sluggable(&record, Vec::new())
    }

    async fn append<T: OrderedRecord>(&self, input: Value) -> Result<Outcome, ContentError> {
        let input: T::Input = deserialize_input(input)?;
        let record = OrderedCollection::<T>::new(self.store()).append(input).await?;
        Outcome::ordered(&record)
    }

    async fn update_ordered<T: OrderedRecord>(
        &self,
        id: &str,
        input: Value,
    ) -> Result<Outcome, ContentError> {
        let input: T::Input = deserialize_input(input)?;
        let record = OrderedCollection::<T>::new(self.store())
            .update(id, input)
            .await?;
        Outcome::ordered(&record)
    }

    async fn remove_ordered<T: OrderedRecord>(&self, id: &str) -> Result<Outcome, ContentError> {
        let removed = OrderedCollection::<T>::new(self.store()).remove(id).await?;
        Outcome::ordered(&removed)
    }

    async fn reorder_ordered<T: OrderedRecord>(
        &self,
        input: Value,
    ) -> Result<Outcome, ContentError> {
        let items: Vec<ReorderItem> = deserialize_input(input)?;
        let collection = OrderedCollection::<T>::new(self.store());
        collection.reorder(&items, self.policy).await?;
        Ok(Outcome {
            data: Some(to_value(&collection.list().await?)?),
            slugs: Vec::new(),
        })
    }

    async fn publish<T: SluggableRecord>(&self, input: Value) -> Result<Outcome, ContentError> {
        let input: T::Input = deserialize_input(input)?;
        let record = Publisher::<T>::new(self.store()).create(input).await?;
        let slugs = vec![record.slug().to_string()];
        Outcome::sluggable(&record, slugs)
    }

    async fn update_published<T: SluggableRecord>(
        &self,
        id: &str,
        input: Value,
    ) -> Result<Outcome, ContentError> {
        let input: T::Input = deserialize_input(input)?;
        let Revision {
            record,
            previous_slug,
        } = Publisher::<T>::new(self.store()).update(id, input).await?;

        let slugs = if previous_slug == record.slug() {
            vec![previous_slug]
        } else {
            vec![previous_slug, record.slug().to_string()]
        };
        Outcome::sluggable(&record, slugs)
    }

    async fn delete_published<T: SluggableRecord>(
        &self,
        id: &str,
    ) -> Result<Outcome, ContentError> {
        let removed = Publisher::<T>::new(self.store()).delete(id).await?;
        let slugs = vec![removed.slug().to_string()];
        Outcome::sluggable(&removed, slugs)
    }
}

impl std::fmt::Debug for ContentActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentActions")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
