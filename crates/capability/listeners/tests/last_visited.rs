use domain::Signal;
use portal_listeners::{
    LastVisitedConfig, LastVisitedItems, ManualClock, VisitOutcome, resolve_or_create_collection,
};
use portal_mam::{InMemoryMamClient, MamOperation};
use portal_signals::SignalBusBuilder;
use std::sync::Arc;

const WINDOW_MS: i64 = 30_000;
const MARKER_FIELD: &str = "portal_collectiontype_hidden";
const MARKER_VALUE: &str = "lastVisitedItems";

fn seeded_client() -> (Arc<InMemoryMamClient>, String) {
    let client = Arc::new(InMemoryMamClient::new());
    let collection_id =
        client.insert_collection("lastVisitedItems", &[(MARKER_FIELD, MARKER_VALUE)]);
    (client, collection_id)
}

fn aggregator(
    client: &Arc<InMemoryMamClient>,
    clock: &Arc<ManualClock>,
    collection_id: Option<String>,
) -> LastVisitedItems {
    LastVisitedItems::with_collection(client.clone(), clock.clone(), WINDOW_MS, collection_id)
}

fn flushed_library(outcome: &VisitOutcome) -> String {
    match outcome {
        VisitOutcome::Flushed { library_id, .. } => library_id.clone(),
        other => panic!("expected flush, got {:?}", other),
    }
}

#[tokio::test]
async fn duplicates_within_window_are_recorded_once() {
    let (client, collection_id) = seeded_client();
    let clock = Arc::new(ManualClock::new(0));
    let items = aggregator(&client, &clock, Some(collection_id));

    flushed_library(&items.on_visit("VX-100").await);

    for (offset, item_id) in ["A", "B", "A", "C", "B", "A"].iter().enumerate() {
        clock.set(1_000 + offset as i64);
        assert_eq!(items.on_visit(item_id).await, VisitOutcome::NotDue);
    }

    assert_eq!(items.pending().await, vec!["A", "B", "C"]);
    assert_eq!(client.call_count(MamOperation::CreateLibrary), 1);
    assert_eq!(items.last_flush_at_ms().await, 0);
}

#[tokio::test]
async fn flushes_at_most_once_per_window() {
    let (client, collection_id) = seeded_client();
    let clock = Arc::new(ManualClock::new(0));
    let items = aggregator(&client, &clock, Some(collection_id.clone()));

    // t=0：初始时间戳在一个窗口之前，首个访问立即写入
    let first = flushed_library(&items.on_visit("A").await);
    assert_eq!(client.library_items(&first), Some(vec!["A".to_string()]));
    assert!(items.pending().await.is_empty());

    clock.set(5_000);
    assert_eq!(items.on_visit("B").await, VisitOutcome::NotDue);
    assert_eq!(items.pending().await, vec!["B"]);

    clock.set(36_000);
    let second = flushed_library(&items.on_visit("C").await);
    assert_eq!(
        client.library_items(&second),
        Some(vec!["B".to_string(), "C".to_string()])
    );
    assert!(items.pending().await.is_empty());
    assert_eq!(items.last_flush_at_ms().await, 36_000);

    let collection = client.collection(&collection_id).expect("collection");
    assert_eq!(collection.libraries, vec![first, second]);
}

#[tokio::test]
async fn window_boundary_is_inclusive() {
    let (client, collection_id) = seeded_client();
    let clock = Arc::new(ManualClock::new(0));
    let items = aggregator(&client, &clock, Some(collection_id));

    flushed_library(&items.on_visit("A").await);
    clock.set(WINDOW_MS - 1);
    assert_eq!(items.on_visit("B").await, VisitOutcome::NotDue);
    clock.set(WINDOW_MS);
    flushed_library(&items.on_visit("C").await);
}

#[tokio::test]
async fn grouping_failure_keeps_pending_and_advances_timestamp() {
    let (client, collection_id) = seeded_client();
    let clock = Arc::new(ManualClock::new(10_000));
    let items = aggregator(&client, &clock, Some(collection_id));

    client.fail_next(MamOperation::CreateLibrary);
    assert_eq!(items.on_visit("A").await, VisitOutcome::GroupingFailed);
    assert_eq!(items.pending().await, vec!["A"]);
    assert_eq!(items.last_flush_at_ms().await, 10_000);

    // 同一窗口内不会再次尝试
    clock.set(20_000);
    assert_eq!(items.on_visit("B").await, VisitOutcome::NotDue);
    assert_eq!(client.call_count(MamOperation::CreateLibrary), 1);

    clock.set(40_000);
    let library_id = flushed_library(&items.on_visit("C").await);
    assert_eq!(
        client.library_items(&library_id),
        Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    );
    assert!(items.pending().await.is_empty());
}

#[tokio::test]
async fn attach_failure_still_clears_pending() {
    let (client, collection_id) = seeded_client();
    let clock = Arc::new(ManualClock::new(0));
    let items = aggregator(&client, &clock, Some(collection_id.clone()));

    client.fail_next(MamOperation::AddLibraryToCollection);
    let VisitOutcome::Flushed {
        library_id,
        attached,
    } = items.on_visit("A").await
    else {
        panic!("expected flush");
    };
    assert!(!attached);
    assert!(items.pending().await.is_empty());

    // library 已创建但未挂载（已知缺口，不重试）
    assert!(client.library_items(&library_id).is_some());
    let collection = client.collection(&collection_id).expect("collection");
    assert!(collection.libraries.is_empty());
}

#[tokio::test]
async fn unresolved_collection_never_calls_remote() {
    let client = Arc::new(InMemoryMamClient::new());
    client.fail_always(MamOperation::SearchCollections);
    let clock = Arc::new(ManualClock::new(0));

    let items =
        LastVisitedItems::new(client.clone(), clock.clone(), LastVisitedConfig::default()).await;
    assert!(items.collection_id().is_none());

    assert_eq!(items.on_visit("A").await, VisitOutcome::Unresolved);
    for step in 1..=5 {
        clock.set(step * WINDOW_MS);
        assert_eq!(items.on_visit("B").await, VisitOutcome::Unresolved);
    }

    assert_eq!(client.calls(), vec![MamOperation::SearchCollections]);
    assert_eq!(items.pending().await, vec!["A", "B"]);
}

#[tokio::test]
async fn resolution_reuses_tagged_collection() {
    let (client, collection_id) = seeded_client();
    client.insert_collection("unrelated", &[(MARKER_FIELD, "favourites")]);

    let resolved = resolve_or_create_collection(client.as_ref(), &LastVisitedConfig::default())
        .await
        .expect("resolve");
    assert_eq!(resolved, collection_id);
    assert_eq!(client.call_count(MamOperation::CreateCollection), 0);
}

#[tokio::test]
async fn resolution_creates_and_tags_missing_collection() {
    let client = Arc::new(InMemoryMamClient::new());
    let clock = Arc::new(ManualClock::new(0));

    let items =
        LastVisitedItems::new(client.clone(), clock.clone(), LastVisitedConfig::default()).await;
    let collection_id = items.collection_id().expect("resolved").to_string();

    let collection = client.collection(&collection_id).expect("collection");
    assert_eq!(collection.name, "lastVisitedItems");
    assert_eq!(
        collection.fields.get(MARKER_FIELD).map(String::as_str),
        Some(MARKER_VALUE)
    );
    assert_eq!(
        client.calls(),
        vec![
            MamOperation::SearchCollections,
            MamOperation::CreateCollection,
            MamOperation::SetCollectionField,
        ]
    );
}

#[tokio::test]
async fn resolution_failures() {
    let client = Arc::new(InMemoryMamClient::new());
    client.fail_next(MamOperation::CreateCollection);
    assert!(
        resolve_or_create_collection(client.as_ref(), &LastVisitedConfig::default())
            .await
            .is_err()
    );

    // 打标记失败仍返回新建的收藏集
    client.fail_next(MamOperation::SetCollectionField);
    let collection_id = resolve_or_create_collection(client.as_ref(), &LastVisitedConfig::default())
        .await
        .expect("created without tag");
    assert!(client.collection(&collection_id).is_some());
}

#[tokio::test]
async fn registered_aggregator_receives_visits_from_bus() {
    let (client, collection_id) = seeded_client();
    let clock = Arc::new(ManualClock::new(0));
    let items = Arc::new(aggregator(&client, &clock, Some(collection_id)));

    let bus = items
        .register(SignalBusBuilder::new())
        .build()
        .expect("build");

    assert_eq!(bus.publish(Signal::item_visited("A")).await, 1);
    clock.set(1_000);
    bus.publish(Signal::item_visited("B")).await;

    assert_eq!(client.call_count(MamOperation::CreateLibrary), 1);
    assert_eq!(items.pending().await, vec!["B"]);
}
