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

use common::CountingStore;
use kcic_cms::content::{StatisticInput, TeamMember, TeamMemberInput};
use kcic_cms::{
    parse_input, ContentError, InMemoryStore, OrderedCollection, ReorderItem, ReorderPolicy,
    Statistic,
};
use serde_json::json;
use std::sync::Arc;

fn stat(label: &str, value: i64) -> StatisticInput {
    parse_input(common::statistic(label, value)).unwrap()
}

async fn assert_contiguous(stats: &OrderedCollection<'_, Statistic>) {
    let orders: Vec<u32> = stats.list().await.unwrap().iter().map(|s| s.order).collect();
    let expected: Vec<u32> = (0..u32::try_from(orders.len()).unwrap()).collect();
    assert_eq!(orders, expected);
}

#[tokio::test]
async fn test_orders_stay_contiguous_across_appends_and_removes() {
    let store = InMemoryStore::new();
    let stats = OrderedCollection::<Statistic>::new(&store);
    let mut ids = Vec::new();

    for round in 0..4 {
        for i in 0..3 {
            let created = stats.append(stat("Jobs created", round * 10 + i + 1)).await.unwrap();
            ids.push(created.id);
            assert_contiguous(&stats).await;
        }
        // Remove from the front, the back and the middle in turn.
        let victim = match round % 3 {
            0 => ids.remove(0),
            1 => ids.pop().unwrap(),
            _ => ids.remove(ids.len() / 2),
        };
        stats.remove(&victim).await.unwrap();
        assert_contiguous(&stats).await;
    }

    assert_eq!(stats.list().await.unwrap().len(), ids.len());
}

#[tokio::test]
async fn test_append_assigns_max_plus_one() {
    let store = InMemoryStore::new();
    let stats = OrderedCollection::<Statistic>::new(&store);
    assert_eq!(stats.append(stat("Jobs", 1)).await.unwrap().order, 0);
    for i in 0..4 {
        stats.append(stat("Jobs", i + 2)).await.unwrap();
    }
    let max = stats.list().await.unwrap().iter().map(|s| s.order).max();
    assert_eq!(max, Some(4));
    assert_eq!(stats.append(stat("SMEs", 9)).await.unwrap().order, 5);
}

#[tokio::test]
async fn test_remove_second_of_four_preserves_sequence() {
    let store = InMemoryStore::new();
    let stats = OrderedCollection::<Statistic>::new(&store);
    let mut created = Vec::new();
    for label in ["Jobs", "SMEs", "Solutions", "Women-led"] {
        created.push(stats.append(stat(label, 10)).await.unwrap());
    }

    stats.remove(&created[1].id).await.unwrap();

    let remaining = stats.list().await.unwrap();
    let pairs: Vec<(&str, u32)> = remaining.iter().map(|s| (s.id.as_str(), s.order)).collect();
    assert_eq!(
        pairs,
        vec![
            (created[0].id.as_str(), 0),
            (created[2].id.as_str(), 1),
            (created[3].id.as_str(), 2),
        ]
    );
}

#[tokio::test]
async fn test_statistics_end_to_end() {
    let store = InMemoryStore::new();
    let stats = OrderedCollection::<Statistic>::new(&store);

    let a = stats.append(stat("Jobs", 100)).await.unwrap();
    let b = stats.append(stat("SMEs", 50)).await.unwrap();
    let c = stats.append(stat("Solutions", 30)).await.unwrap();
    assert_eq!((a.order, b.order, c.order), (0, 1, 2));

    stats.remove(&b.id).await.unwrap();
    assert_eq!(stats.get(&a.id).await.unwrap().order, 0);
    assert_eq!(stats.get(&c.id).await.unwrap().order, 1);

    // The same request is a full permutation, so both policies accept it.
    for policy in [ReorderPolicy::Trusting, ReorderPolicy::Strict] {
        stats
            .reorder(
                &[ReorderItem::new(c.id.clone(), 0), ReorderItem::new(a.id.clone(), 1)],
                policy,
            )
            .await
            .unwrap();
        assert_eq!(stats.get(&c.id).await.unwrap().order, 0);
        assert_eq!(stats.get(&a.id).await.unwrap().order, 1);
    }
}

#[tokio::test]
async fn test_strict_reorder_rejection_writes_nothing() {
    let store = CountingStore::new(InMemoryStore::new());
    let stats = OrderedCollection::<Statistic>::new(&store);
    let a = stats.append(stat("Jobs", 100)).await.unwrap();
    let b = stats.append(stat("SMEs", 50)).await.unwrap();
    let writes = store.writes();

    let gapped = [ReorderItem::new(a.id.clone(), 0), ReorderItem::new(b.id.clone(), 5)];
    let err = stats.reorder(&gapped, ReorderPolicy::Strict).await.unwrap_err();
    assert!(matches!(err, ContentError::Validation(_)));

    let duplicate = [ReorderItem::new(a.id.clone(), 0), ReorderItem::new(a.id.clone(), 1)];
    assert!(stats.reorder(&duplicate, ReorderPolicy::Trusting).await.is_err());

    assert_eq!(store.writes(), writes);
}

#[tokio::test]
async fn test_remove_missing_writes_nothing() {
    let store = CountingStore::new(InMemoryStore::new());
    let stats = OrderedCollection::<Statistic>::new(&store);
    stats.append(stat("Jobs", 100)).await.unwrap();
    let writes = store.writes();

    let err = stats.remove("not-a-real-id").await.unwrap_err();
    assert!(matches!(err, ContentError::NotFound { .. }));
    assert_eq!(store.writes(), writes);
}

#[tokio::test]
async fn test_compaction_is_one_batched_write() {
    let store = CountingStore::new(InMemoryStore::new());
    let stats = OrderedCollection::<Statistic>::new(&store);
    let first = stats.append(stat("Jobs", 1)).await.unwrap();
    for i in 0..4 {
        stats.append(stat("Jobs", i + 2)).await.unwrap();
    }
    let writes = store.writes();

    stats.remove(&first.id).await.unwrap();

    // One delete plus one batched renumbering.
    assert_eq!(store.writes(), writes + 2);
    assert_contiguous(&stats).await;
}

#[tokio::test]
async fn test_removing_last_record_needs_no_renumbering() {
    let store = CountingStore::new(InMemoryStore::new());
    let stats = OrderedCollection::<Statistic>::new(&store);
    stats.append(stat("Jobs", 1)).await.unwrap();
    let last = stats.append(stat("SMEs", 2)).await.unwrap();
    let writes = store.writes();

    stats.remove(&last.id).await.unwrap();
    assert_eq!(store.writes(), writes + 1);
}

#[tokio::test]
async fn test_concurrent_appends_get_distinct_orders() {
    let store = Arc::new(InMemoryStore::new());
    let mut handles = Vec::new();
    for i in 0..20 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            OrderedCollection::<Statistic>::new(store.as_ref())
                .append(stat("Concurrent", i + 1))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stats = OrderedCollection::<Statistic>::new(store.as_ref());
    assert_eq!(stats.list().await.unwrap().len(), 20);
    assert_contiguous(&stats).await;
}

#[tokio::test]
async fn test_concurrent_removes_leave_contiguous_orders() {
    let store = Arc::new(InMemoryStore::new());
    let stats = OrderedCollection::<Statistic>::new(store.as_ref());
    let mut ids = Vec::new();
    for i in 0..12 {
        ids.push(stats.append(stat("Jobs", i + 1)).await.unwrap().id);
    }

    let mut handles = Vec::new();
    for id in ids.iter().step_by(2).cloned() {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            OrderedCollection::<Statistic>::new(store.as_ref())
                .remove(&id)
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(stats.list().await.unwrap().len(), 6);
    assert_contiguous(&stats).await;
}

#[tokio::test]
async fn test_collections_are_independent() {
    let store = InMemoryStore::new();
    let stats = OrderedCollection::<Statistic>::new(&store);
    let team = OrderedCollection::<TeamMember>::new(&store);

    stats.append(stat("Jobs", 1)).await.unwrap();
    stats.append(stat("SMEs", 2)).await.unwrap();
    let input: TeamMemberInput = parse_input(json!({
        "name": "Wanjiru Kamau",
        "role": "Programme Lead"
    }))
    .unwrap();
    assert_eq!(team.append(input).await.unwrap().order, 0);
}
