//! End-to-end CRUD behavior of the address API.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use geo_addresses_integration_tests::{TestContext, address_json, ids};

// ============================================================================
// Create & Read
// ============================================================================

#[tokio::test]
async fn test_create_then_read_returns_identical_record() {
    let ctx = TestContext::new().await;
    let body = address_json(1, "742 Evergreen Terrace", 39.7817, -89.6501);

    let resp = ctx.create(&body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap(), body);

    let resp = ctx.get(1).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap(), body);
}

#[tokio::test]
async fn test_created_record_appears_once_in_list() {
    let ctx = TestContext::new().await;
    ctx.create(&address_json(1, "A St", 1.0, 1.0)).await;
    ctx.create(&address_json(2, "B St", 2.0, 2.0)).await;

    let listed = ids(&ctx.list().await);
    assert_eq!(listed.iter().filter(|&&id| id == 2).count(), 1);
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn test_list_empty_store() {
    let ctx = TestContext::new().await;
    assert!(ctx.list().await.is_empty());
}

#[tokio::test]
async fn test_collection_path_without_trailing_slash() {
    let ctx = TestContext::new().await;
    ctx.create(&address_json(4, "No Slash Rd", 0.0, 0.0)).await;

    let resp = ctx.client.get(ctx.url("/addresses")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ids(&resp.json::<Vec<Value>>().await.unwrap()), vec![4]);
}

#[tokio::test]
async fn test_read_missing_is_404() {
    let ctx = TestContext::new().await;

    let resp = ctx.get(12345).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({"detail": "Address not found"})
    );
}

#[tokio::test]
async fn test_duplicate_id_is_rejected_without_overwrite() {
    let ctx = TestContext::new().await;
    let existing = address_json(7, "Existing Ave", 10.0, 10.0);
    ctx.create(&existing).await;

    let resp = ctx.create(&address_json(7, "Impostor Ave", 20.0, 20.0)).await;
    assert!(resp.status().is_server_error());

    let stored: Value = ctx.get(7).await.json().await.unwrap();
    assert_eq!(stored, existing);
    assert_eq!(ctx.list().await.len(), 1);
}

#[tokio::test]
async fn test_create_with_missing_field_is_422() {
    let ctx = TestContext::new().await;
    let mut body = address_json(1, "Half Built Blvd", 0.0, 0.0);
    body.as_object_mut().unwrap().remove("latitude");

    let resp = ctx.create(&body).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(ctx.list().await.is_empty());
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let ctx = TestContext::new().await;
    ctx.create(&address_json(3, "Old Street", 1.0, 2.0)).await;

    let replacement = json!({
        "id": 3,
        "street": "New Street",
        "city": "Shelbyville",
        "state": "KY",
        "country": "USA",
        "latitude": 38.2115,
        "longitude": -85.2236
    });
    let resp = ctx.update(3, &replacement).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap(), replacement);

    let stored: Value = ctx.get(3).await.json().await.unwrap();
    assert_eq!(stored, replacement);
}

#[tokio::test]
async fn test_update_missing_id_succeeds_without_effect() {
    let ctx = TestContext::new().await;
    ctx.create(&address_json(1, "Existing Ln", 0.0, 0.0)).await;
    let body = address_json(99, "Phantom Pl", 5.0, 5.0);

    let resp = ctx.update(99, &body).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await.unwrap(), body);

    assert_eq!(ids(&ctx.list().await), vec![1]);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_existing_removes_it() {
    let ctx = TestContext::new().await;
    ctx.create(&address_json(5, "Doomed Dr", 0.0, 0.0)).await;

    let resp = ctx.delete(5).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({"message": "Address with id 5 deleted"})
    );

    assert_eq!(ctx.get(5).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_id_succeeds_and_leaves_store_unchanged() {
    let ctx = TestContext::new().await;
    ctx.create(&address_json(1, "Keeper Ct", 0.0, 0.0)).await;
    let before = ctx.list().await;

    let resp = ctx.delete(2).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({"message": "Address with id 2 deleted"})
    );

    assert_eq!(ctx.list().await, before);
}
