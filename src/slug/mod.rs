//! URL slugs for news articles and opportunities.

use crate::store::{row_id, Filter, FindMany, Store, StoreError};
use tracing::debug;

/// Name of the slug column in sluggable tables.
pub const SLUG_FIELD: &str = "slug";

/// Derive a URL-safe slug from a title.
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// hyphens, then turns every whitespace/hyphen run into a single hyphen with
/// none at either end. The result may be empty.
#[must_use]
pub fn normalize(title: &str) -> String {
    title
        .to_lowercase()
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                Some(c)
            } else if c.is_whitespace() || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Base slug for a record: the normalized title, or `fallback_id` when the
/// title has no usable characters.
#[must_use]
pub fn base_slug(title: &str, fallback_id: &str) -> String {
    let slug = normalize(title);
    if slug.is_empty() {
        debug!(title, fallback_id, "Title normalizes to an empty slug; using id");
        fallback_id.to_string()
    } else {
        slug
    }
}

/// Candidate number `n` for a base slug (`base`, `base-1`, `base-2`, ...).
#[must_use]
pub fn candidate(base: &str, n: u64) -> String {
    if n == 0 {
        base.to_string()
    } else {
        format!("{base}-{n}")
    }
}

/// Find the first free slug in `table` starting from `base`.
///
/// A candidate is free when no row uses it, or when the only rows using it
/// have the id `exclude_id` (an update must not collide with itself). Only
/// reads the store; callers hold the table lock across this call and the
/// write that uses the result.
pub async fn ensure_unique(
    store: &dyn Store,
    table: &str,
    base: &str,
    exclude_id: Option<&str>,
) -> Result<String, StoreError> {
    let mut n: u64 = 0;
    loop {
        let slug = candidate(base, n);
        let holders = store
            .find_many(
                table,
                FindMany::all().with_filter(Filter::new().eq(SLUG_FIELD, slug.as_str())),
            )
            .await?;
        let taken = holders
            .iter()
            .any(|row| exclude_id.is_none() || row_id(row) != exclude_id);
        if !taken {
            debug!(table, slug = %slug, attempts = n.saturating_add(1), "Resolved unique slug");
            return Ok(slug);
        }
        n = n.saturating_add(1);
    }
}
