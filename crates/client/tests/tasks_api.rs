//! End-to-end task requests through the client handle.

use std::sync::{Arc, Mutex};

use asana_abstractions::{HttpMethod, RequestAdapter, RequestError, RequestInformation, TaskGid};
use asana_client::{AsanaApiClient, TasksPostRequestBody, TasksPostRequestBodyData};
use async_trait::async_trait;
use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Records requests instead of sending them.
#[derive(Default)]
struct RecordingAdapter {
    requests: Mutex<Vec<RequestInformation>>,
}

#[async_trait]
impl RequestAdapter for RecordingAdapter {
    fn base_url(&self) -> Option<&str> {
        Some("https://asana.test/api/1.0")
    }

    async fn send(&self, request: RequestInformation) -> Result<Option<Value>, RequestError> {
        self.requests
            .lock()
            .unwrap()
            .push(request);
        Ok(Some(json!({ "data": { "gid": "1" } })))
    }
}

fn sample_data() -> TasksPostRequestBodyData {
    TasksPostRequestBodyData {
        workspace: Some("1001".into()),
        projects: Some(vec!["2002".into()]),
        ..Default::default()
    }
    .with_name("Write release notes")
    .with_due_on("2026-12-31")
    .with_completed(false)
    .with_external_id("ext-123")
}

#[tokio::test]
async fn test_token_client_posts_bearer_and_flattened_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/1.0/tasks")
        .match_header("authorization", "Bearer test-token-12345")
        .match_body(Matcher::Json(json!({
            "data": {
                "workspace": "1001",
                "projects": ["2002"],
                "name": "Write release notes",
                "due_on": "2026-12-31",
                "completed": false,
                "external": { "id": "ext-123" }
            }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"gid":"9876","name":"Write release notes"}}"#)
        .create_async()
        .await;

    let client = AsanaApiClient::builder()
        .access_token("test-token-12345")
        .transport(reqwest::Client::new())
        .base_url(format!("{}/api/1.0", server.url()))
        .build()
        .unwrap();

    let created = client
        .client()
        .tasks()
        .post(&TasksPostRequestBody::new(sample_data()))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created.unwrap()["data"]["gid"], "9876");
}

#[tokio::test]
async fn test_get_and_delete_by_gid() {
    let mut server = mockito::Server::new_async().await;
    let get = server
        .mock("GET", "/tasks/42")
        .match_query(Matcher::UrlEncoded("opt_fields".into(), "name,notes".into()))
        .with_status(200)
        .with_body(r#"{"data":{"gid":"42","name":"n"}}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/tasks/42")
        .with_status(200)
        .with_body(r#"{"data":{}}"#)
        .create_async()
        .await;

    let client = AsanaApiClient::builder()
        .access_token("token")
        .transport(reqwest::Client::new())
        .base_url(server.url())
        .build()
        .unwrap();
    let gid = TaskGid::new("42").unwrap();

    let fetched = client
        .client()
        .tasks()
        .by_task_gid(&gid)
        .with_opt_fields(["name", "notes"])
        .get()
        .await
        .unwrap();
    let deleted = client.client().tasks().by_task_gid(&gid).delete().await.unwrap();

    get.assert_async().await;
    delete.assert_async().await;
    assert_eq!(fetched.unwrap()["data"]["name"], "n");
    assert_eq!(deleted, Some(json!({ "data": {} })));
}

#[tokio::test]
async fn test_service_error_status_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/tasks")
        .with_status(401)
        .with_body(r#"{"errors":[{"message":"Not Authorized"}]}"#)
        .create_async()
        .await;

    let client = AsanaApiClient::builder()
        .access_token("bad-token")
        .transport(reqwest::Client::new())
        .base_url(server.url())
        .build()
        .unwrap();

    let err = client
        .client()
        .tasks()
        .post(&TasksPostRequestBody::new(sample_data()))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_custom_adapter_receives_request_description() {
    let adapter = Arc::new(RecordingAdapter::default());
    let client = AsanaApiClient::with_request_adapter(adapter.clone());

    client
        .client()
        .tasks()
        .post(&TasksPostRequestBody::new(sample_data()))
        .await
        .unwrap();

    let requests = adapter.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "https://asana.test/api/1.0/tasks");
    assert!(!request.has_header("authorization"));
    assert_eq!(
        request.content.as_ref().unwrap()["data"]["external"],
        json!({ "id": "ext-123" })
    );
}
