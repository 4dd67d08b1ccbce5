use domain::{ItemMetadata, MamUser, MetadataField};
use portal_mam::{InMemoryMamClient, MamClient, MamError, MamOperation, fetch_backend_users};

#[tokio::test]
async fn collection_create_tag_and_search() {
    let client = InMemoryMamClient::new();
    let collection_id = client
        .create_collection("lastVisitedItems")
        .await
        .expect("create");
    client
        .set_collection_field(&collection_id, "portal_collectiontype_hidden", "lastVisitedItems")
        .await
        .expect("tag");

    let hits = client
        .search_collections("portal_collectiontype_hidden", "lastVisitedItems")
        .await
        .expect("search");
    assert_eq!(hits, vec![collection_id.clone()]);

    let misses = client
        .search_collections("portal_collectiontype_hidden", "other")
        .await
        .expect("search");
    assert!(misses.is_empty());
}

#[tokio::test]
async fn library_attach_requires_existing_ids() {
    let client = InMemoryMamClient::new();
    let collection_id = client.insert_collection("c", &[]);
    let library_id = client
        .create_library_from_items(&["VX-10".to_string(), "VX-11".to_string()])
        .await
        .expect("library");
    assert_eq!(
        client.library_items(&library_id),
        Some(vec!["VX-10".to_string(), "VX-11".to_string()])
    );

    client
        .add_library_to_collection(&collection_id, &library_id)
        .await
        .expect("attach");
    let collection = client.collection(&collection_id).expect("collection");
    assert_eq!(collection.libraries, vec![library_id.clone()]);

    let err = client
        .add_library_to_collection("VX-999", &library_id)
        .await
        .expect_err("missing collection");
    assert!(matches!(err, MamError::NotFound(_)));
}

#[tokio::test]
async fn injected_failures_once_and_always() {
    let client = InMemoryMamClient::new();
    client.fail_next(MamOperation::CreateCollection);
    assert!(client.create_collection("a").await.is_err());
    assert!(client.create_collection("a").await.is_ok());

    client.fail_always(MamOperation::SearchCollections);
    assert!(client.search_collections("f", "v").await.is_err());
    assert!(client.search_collections("f", "v").await.is_err());
    client.clear_failures();
    assert!(client.search_collections("f", "v").await.is_ok());

    assert_eq!(client.call_count(MamOperation::CreateCollection), 2);
    assert_eq!(client.call_count(MamOperation::SearchCollections), 3);
}

#[tokio::test]
async fn item_metadata_lookup() {
    let client = InMemoryMamClient::new();
    client.insert_item(
        "VX-1",
        ItemMetadata::new(vec![MetadataField::new("title", "Sunset")]),
    );

    let metadata = client.get_item_metadata("VX-1").await.expect("metadata");
    assert_eq!(
        metadata.field_by_name("title").and_then(|f| f.first_value()),
        Some("Sunset")
    );
    assert!(client.get_item_metadata("VX-2").await.is_err());
}

#[tokio::test]
async fn backend_users_include_disabled_and_degrade_to_empty() {
    let client = InMemoryMamClient::new();
    client.insert_user(MamUser::new("admin", Some("Administrator".to_string())));
    client.insert_user(MamUser {
        username: "former".to_string(),
        real_name: None,
        disabled: true,
    });

    let users = fetch_backend_users(&client).await;
    assert_eq!(users.len(), 2);

    client.fail_next(MamOperation::ListUsers);
    let users = fetch_backend_users(&client).await;
    assert!(users.is_empty());
}
