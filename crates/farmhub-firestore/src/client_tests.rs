//! HTTP-level tests for the Firestore client, backed by wiremock.
//!
//! The client is pointed at the mock server through the emulator host seam,
//! which also disables service-account loading.

use std::collections::HashMap;
use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::{FirestoreClient, FirestoreConfig};
use crate::error::FirestoreError;
use crate::types::{ToFirestoreValue, Value};

async fn client_for(server: &MockServer) -> FirestoreClient {
    let host = server
        .uri()
        .trim_start_matches("http://")
        .to_string();

    let config = FirestoreConfig {
        project_id: "test-project".to_string(),
        database_id: "(default)".to_string(),
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        emulator_host: Some(host),
    };

    FirestoreClient::new(config)
        .await
        .expect("client construction must not need credentials in emulator mode")
}

fn doc_path(rest: &str) -> String {
    format!(
        "/v1/projects/test-project/databases/(default)/documents/{}",
        rest
    )
}

fn user_doc_body() -> serde_json::Value {
    serde_json::json!({
        "name": "projects/test-project/databases/(default)/documents/users/u1",
        "fields": {
            "email": { "stringValue": "farm-owner@example.com" },
            "name": { "stringValue": "Farm Owner" }
        },
        "createTime": "2024-06-01T12:00:00Z",
        "updateTime": "2024-06-01T12:00:00Z"
    })
}

#[tokio::test]
async fn test_get_document_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(doc_path("users/u1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_doc_body()))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let doc = client.get_document("users", "u1").await.unwrap().unwrap();

    assert_eq!(doc.field_names(), vec!["email", "name"]);
    let fields = doc.fields.unwrap();
    assert_eq!(
        fields["email"],
        Value::StringValue("farm-owner@example.com".to_string())
    );
}

#[tokio::test]
async fn test_get_document_missing_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(doc_path("users/ghost")))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let doc = client.get_document("users", "ghost").await.unwrap();
    assert!(doc.is_none());
}

#[tokio::test]
async fn test_set_document_patches_without_mask() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(doc_path("users/u1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_doc_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut fields = HashMap::new();
    fields.insert("email".to_string(), "farm-owner@example.com".to_firestore_value());
    fields.insert("name".to_string(), "Farm Owner".to_firestore_value());

    let doc = client.set_document("users", "u1", fields).await.unwrap();
    assert!(doc.name.is_some());
}

#[tokio::test]
async fn test_update_document_sends_mask_and_precondition() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(doc_path(
            "users/u1/devices/d1/automationRules/current",
        )))
        .and(query_param("currentDocument.exists", "true"))
        .and(query_param("updateMask.fieldPaths", "motor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_doc_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut fields = HashMap::new();
    fields.insert("motor".to_string(), true.to_firestore_value());

    client
        .update_document(
            "users/u1/devices/d1/automationRules",
            "current",
            fields,
            vec!["motor".to_string()],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_missing_document_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(doc_path("users/u1/devices/d1/automationRules/current")))
        .respond_with(ResponseTemplate::new(404).set_body_string("no entity"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut fields = HashMap::new();
    fields.insert("motor".to_string(), true.to_firestore_value());

    let err = client
        .update_document(
            "users/u1/devices/d1/automationRules",
            "current",
            fields,
            vec!["motor".to_string()],
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_server_error_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(doc_path("users/u1")))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_document("users", "u1").await.unwrap_err();
    assert!(matches!(err, FirestoreError::ServerError(503, _)));
}

#[tokio::test]
async fn test_permission_denied_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(doc_path("users/u1")))
        .respond_with(ResponseTemplate::new(403).set_body_string("missing permission"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_document("users", "u1").await.unwrap_err();
    assert!(matches!(err, FirestoreError::PermissionDenied(_)));
}
