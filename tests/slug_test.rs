#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing
)]

mod common;

use kcic_cms::content::{NewsArticleInput, OpportunityInput};
use kcic_cms::slug::{base_slug, ensure_unique, SLUG_FIELD};
use kcic_cms::store::{patch, FindMany};
use kcic_cms::{normalize, parse_input, InMemoryStore, NewsArticle, Opportunity, Publisher, Store};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn article(title: &str) -> NewsArticleInput {
    parse_input(common::article(title)).unwrap()
}

fn opening(title: &str, description: &str) -> OpportunityInput {
    parse_input(json!({
        "title": title,
        "description": description,
        "type": "job",
        "location": "Nairobi"
    }))
    .unwrap()
}

#[test]
fn test_normalize_known_title() {
    assert_eq!(
        normalize("Climate Innovation Summit 2024!"),
        "climate-innovation-summit-2024"
    );
}

#[test]
fn test_base_slug_empty_title_falls_back() {
    assert_eq!(base_slug("?!?", "8d3c"), "8d3c");
}

#[tokio::test]
async fn test_second_and_third_collisions_are_numbered() {
    let store = InMemoryStore::new();
    store
        .insert(
            "news_articles",
            patch([("id", json!("seed")), (SLUG_FIELD, json!("climate-summit"))]),
        )
        .await
        .unwrap();

    let news = Publisher::<NewsArticle>::new(&store);
    let second = news.create(article("Climate Summit")).await.unwrap();
    let third = news.create(article("Climate Summit")).await.unwrap();
    assert_eq!(second.slug, "climate-summit-1");
    assert_eq!(third.slug, "climate-summit-2");
}

#[tokio::test]
async fn test_slugs_unique_across_many_creates() {
    let store = InMemoryStore::new();
    let news = Publisher::<NewsArticle>::new(&store);
    let titles = [
        "Climate Summit",
        "Climate  Summit",
        "climate-summit",
        "Climate Summit!",
        "Climate Summit 1",
        "Green Jobs",
        "Climate Summit",
    ];
    for title in titles {
        news.create(article(title)).await.unwrap();
    }

    let slugs: Vec<String> = news.list().await.unwrap().into_iter().map(|a| a.slug).collect();
    let distinct: HashSet<&String> = slugs.iter().collect();
    assert_eq!(distinct.len(), titles.len(), "{slugs:?}");
}

#[tokio::test]
async fn test_concurrent_creates_never_share_a_slug() {
    let store = Arc::new(InMemoryStore::new());
    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            Publisher::<Opportunity>::new(store.as_ref())
                .create(opening(
                    "Programme Officer",
                    "Coordinate the agribusiness accelerator cohort.",
                ))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let rows = store
        .find_many("opportunities", FindMany::all())
        .await
        .unwrap();
    let slugs: HashSet<&str> = rows
        .iter()
        .filter_map(|r| r.get(SLUG_FIELD).and_then(|s| s.as_str()))
        .collect();
    assert_eq!(rows.len(), 16);
    assert_eq!(slugs.len(), 16);
    assert!(slugs.contains("programme-officer"));
    assert!(slugs.contains("programme-officer-15"));
}

#[tokio::test]
async fn test_description_edit_keeps_slug() {
    let store = InMemoryStore::new();
    let openings = Publisher::<Opportunity>::new(&store);
    let created = openings
        .create(opening("Programme Officer", "Coordinate the accelerator cohort."))
        .await
        .unwrap();

    let updated = openings
        .update(
            &created.id,
            opening("Programme Officer", "Coordinate the cohort and manage partners."),
        )
        .await
        .unwrap()
        .record;
    assert_eq!(updated.slug, created.slug);
    assert_eq!(updated.description, "Coordinate the cohort and manage partners.");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_retitle_frees_old_slug() {
    let store = InMemoryStore::new();
    let news = Publisher::<NewsArticle>::new(&store);
    let first = news.create(article("Climate Summit")).await.unwrap();

    news.update(&first.id, article("Energy Forum")).await.unwrap();
    let second = news.create(article("Climate Summit")).await.unwrap();

    assert_eq!(second.slug, "climate-summit");
    assert_eq!(news.get_by_slug("energy-forum").await.unwrap().id, first.id);
}

#[tokio::test]
async fn test_ensure_unique_with_exclusion_skips_other_holders() {
    let store = InMemoryStore::new();
    for (id, slug) in [("a", "forum"), ("b", "forum-1")] {
        store
            .insert("opportunities", patch([("id", json!(id)), (SLUG_FIELD, json!(slug))]))
            .await
            .unwrap();
    }
    let slug = ensure_unique(&store, "opportunities", "forum", Some("b"))
        .await
        .unwrap();
    assert_eq!(slug, "forum-1");
}
