mod common;

use common::TestApp;
use mongodb::bson::oid::ObjectId;
use reqwest::{Client, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_and_get_parcel_round_trip() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let body = json!({
        "user": { "uid": "u1", "name": "Alice", "email": "alice@example.com" },
        "title": "Books",
        "parcelType": "box",
        "weightKg": 2.5,
        "receiverName": "Bob",
        "createdAt": "2024-01-01T00:00:00Z"
    });

    let response = client
        .post(format!("{}/api/parcels", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, response.status());
    let created: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let inserted_id = created["insertedId"].as_str().expect("missing insertedId");
    assert!(ObjectId::parse_str(inserted_id).is_ok());

    let response = client
        .get(format!("{}/api/parcels/{}", app.address, inserted_id))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());
    let parcel: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(parcel["id"], inserted_id);
    assert_eq!(parcel["user"]["email"], "alice@example.com");
    assert_eq!(parcel["title"], "Books");
    assert_eq!(parcel["parcelType"], "box");
    assert_eq!(parcel["weightKg"], 2.5);
    assert_eq!(parcel["receiverName"], "Bob");
    assert_eq!(parcel["paymentStatus"], "unpaid");
    assert_eq!(parcel["createdAt"], "2024-01-01T00:00:00+00:00");

    app.cleanup().await;
}

#[tokio::test]
async fn get_parcel_with_malformed_id_returns_400() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/parcels/not-an-object-id", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    app.cleanup().await;
}

#[tokio::test]
async fn get_missing_parcel_returns_404() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/api/parcels/{}",
            app.address,
            ObjectId::new().to_hex()
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, response.status());

    app.cleanup().await;
}

#[tokio::test]
async fn delete_then_get_returns_404() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let body = json!({
        "user": { "email": "carol@example.com" }
    });

    let response = client
        .post(format!("{}/api/parcels", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::CREATED, response.status());
    let created: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let inserted_id = created["insertedId"].as_str().expect("missing insertedId");

    let response = client
        .delete(format!("{}/api/parcels/{}", app.address, inserted_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::OK, response.status());
    let deleted: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(deleted["message"], "Parcel deleted successfully");

    let response = client
        .get(format!("{}/api/parcels/{}", app.address, inserted_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::NOT_FOUND, response.status());

    app.cleanup().await;
}

#[tokio::test]
async fn delete_with_malformed_id_returns_400() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .delete(format!("{}/api/parcels/nope", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    app.cleanup().await;
}

#[tokio::test]
async fn delete_missing_parcel_returns_404() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .delete(format!(
            "{}/api/parcels/{}",
            app.address,
            ObjectId::new().to_hex()
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, response.status());

    app.cleanup().await;
}

#[tokio::test]
async fn list_parcels_filters_by_owner_and_sorts_newest_first() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    for (email, title, created_at) in [
        ("dave@example.com", "older", "2024-01-01T00:00:00Z"),
        ("dave@example.com", "newer", "2024-02-01T00:00:00Z"),
        ("erin@example.com", "other", "2024-03-01T00:00:00Z"),
    ] {
        let body = json!({
            "user": { "email": email },
            "title": title,
            "createdAt": created_at
        });
        let response = client
            .post(format!("{}/api/parcels", app.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::CREATED, response.status());
    }

    let response = client
        .get(format!(
            "{}/api/parcels?userEmail=dave@example.com",
            app.address
        ))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());
    let parcels: Vec<serde_json::Value> = response.json().await.expect("Failed to parse JSON");
    assert_eq!(parcels.len(), 2);
    assert_eq!(parcels[0]["title"], "newer");
    assert_eq!(parcels[1]["title"], "older");

    // Unfiltered listing returns everything
    let response = client
        .get(format!("{}/api/parcels", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    let all: Vec<serde_json::Value> = response.json().await.expect("Failed to parse JSON");
    assert_eq!(all.len(), 3);

    app.cleanup().await;
}

#[tokio::test]
async fn create_parcel_rejects_unknown_fields() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let body = json!({
        "user": { "email": "frank@example.com" },
        "smuggledField": "nope"
    });

    let response = client
        .post(format!("{}/api/parcels", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, response.status());

    app.cleanup().await;
}

#[tokio::test]
async fn create_parcel_rejects_invalid_email() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let body = json!({
        "user": { "email": "not-an-email" }
    });

    let response = client
        .post(format!("{}/api/parcels", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, response.status());

    app.cleanup().await;
}
