//! End-to-end tests of the resource adapters and the serving loop against a
//! mock Wistia API
//!
//! Run with: cargo test -p terraform-provider-wistia --test provider_tests

use std::io::Write;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use terraform_provider_wistia::{ProviderServer, ResourceRegistry};
use wistia_client::WistiaClient;

fn server_for(mock: &MockServer) -> ProviderServer {
    let client = WistiaClient::builder("test-token")
        .api_endpoint(format!("{}/v1/", mock.uri()))
        .upload_endpoint(format!("{}/upload", mock.uri()))
        .build()
        .expect("client");
    ProviderServer::new(client, ResourceRegistry::wistia())
}

async fn call(server: &ProviderServer, request: Value) -> Value {
    let response = server.handle_line(&request.to_string()).await;
    serde_json::to_value(response).unwrap()
}

fn media_response(status: &str) -> Value {
    json!({
        "id": 9,
        "name": "Intro",
        "type": "Video",
        "status": status,
        "duration": 12.5,
        "created": "2021-01-01T00:00:00+00:00",
        "updated": "2021-01-01T00:00:00+00:00",
        "description": "",
        "hashed_id": "media123",
        "project": {"id": 1, "name": "Marketing", "hashed_id": "proj123"}
    })
}

#[tokio::test]
async fn test_project_lifecycle() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/projects.json"))
        .and(body_string_contains("\"anonymous_can_upload\":true"))
        .and(body_string_contains("\"anonymousCanUpload\":true"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "Marketing",
            "hashedId": "proj123",
            "anonymous_can_upload": false,
            "anonymousCanUpload": true
        })))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/proj123.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Marketing",
            "hashedId": "proj123",
            "mediaCount": 2,
            "media_count": 2,
            "anonymousCanDownload": true
        })))
        .expect(1)
        .mount(&mock)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/projects/proj123.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    let created = call(
        &server,
        json!({"op": "create", "resource": "wistia_project",
               "state": {"name": "Marketing", "anonymous_can_upload": true}}),
    )
    .await;
    assert_eq!(created["ok"], true, "{created}");
    assert_eq!(created["state"]["id"], "proj123");
    assert_eq!(created["state"]["anonymous_can_upload"], true);

    let read = call(
        &server,
        json!({"op": "read", "resource": "wistia_project", "state": created["state"]}),
    )
    .await;
    assert_eq!(read["state"]["media_count"], 2);
    assert_eq!(read["state"]["anonymous_can_download"], true);
    assert_eq!(read["state"]["anonymous_can_upload"], false);

    let deleted = call(
        &server,
        json!({"op": "delete", "resource": "wistia_project", "state": read["state"]}),
    )
    .await;
    assert_eq!(deleted, json!({"ok": true}));
}

#[tokio::test]
async fn test_project_create_failure_is_reported() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/projects.json"))
        .respond_with(ResponseTemplate::new(422).set_body_string(r#"{"error":"name required"}"#))
        .mount(&mock)
        .await;

    let response = call(
        &server_for(&mock),
        json!({"op": "create", "resource": "wistia_project", "state": {"name": "x"}}),
    )
    .await;
    assert_eq!(response["ok"], false);
    assert!(response.get("state").is_none());
    let message = response["error"].as_str().unwrap();
    assert!(message.starts_with("couldn't create Wistia project"), "{message}");
    assert!(message.contains("422"), "{message}");
    assert!(message.contains(r#"{"error":"name required"}"#), "{message}");
}

#[tokio::test]
async fn test_media_from_url() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("project_id=proj123"))
        .and(body_string_contains("url=https%3A%2F%2Fexample.com%2Fa.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_response("queued")))
        .expect(1)
        .mount(&mock)
        .await;

    let response = call(
        &server_for(&mock),
        json!({"op": "create", "resource": "wistia_media", "state": {
            "project_id": "proj123",
            "name": "Intro",
            "url": "https://example.com/a.mp4",
            "file": ""
        }}),
    )
    .await;
    assert_eq!(response["ok"], true, "{response}");
    let state = &response["state"];
    assert_eq!(state["id"], "media123");
    assert_eq!(state["media_id"], 9);
    assert_eq!(state["status"], "queued");
    assert_eq!(state["type"], "Video");
    assert_eq!(state["url"], "https://example.com/a.mp4");
    assert_eq!(state["project_id"], "proj123");
}

#[tokio::test]
async fn test_media_from_file() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("filename=\"clip.mp4\""))
        .and(body_string_contains("fake video bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_response("processing")))
        .expect(1)
        .mount(&mock)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("clip.mp4");
    std::fs::File::create(&file_path)
        .unwrap()
        .write_all(b"fake video bytes")
        .unwrap();
    let file = file_path.to_str().unwrap();

    let response = call(
        &server_for(&mock),
        json!({"op": "create", "resource": "wistia_media",
               "state": {"project_id": "proj123", "file": file}}),
    )
    .await;
    assert_eq!(response["ok"], true, "{response}");
    assert_eq!(response["state"]["file"], file);
    assert_eq!(response["state"]["status"], "processing");
}

#[tokio::test]
async fn test_media_source_conflict_sends_nothing() {
    let mock = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock)
        .await;

    let server = server_for(&mock);
    for state in [
        json!({"project_id": "proj123", "file": "a.mp4", "url": "https://example.com/a.mp4"}),
        json!({"project_id": "proj123"}),
        json!({"project_id": "proj123", "file": "", "url": ""}),
    ] {
        let response = call(
            &server,
            json!({"op": "create", "resource": "wistia_media", "state": state}),
        )
        .await;
        assert_eq!(response["ok"], false);
        assert!(response["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid attributes"));
    }
}

#[tokio::test]
async fn test_media_update_sends_snapshot() {
    let mock = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/medias/media123.json"))
        .and(body_string_contains("\"name\":\"Renamed\""))
        .and(body_string_contains("\"project\":{\"hashed_id\":\"proj123\"}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_response("ready")))
        .expect(1)
        .mount(&mock)
        .await;

    let response = call(
        &server_for(&mock),
        json!({"op": "update", "resource": "wistia_media", "state": {
            "id": "media123",
            "hashed_id": "media123",
            "media_id": 9,
            "project_id": "proj123",
            "url": "https://example.com/a.mp4",
            "name": "Renamed",
            "type": "Video",
            "status": "processing"
        }}),
    )
    .await;
    assert_eq!(response["ok"], true, "{response}");
    assert_eq!(response["state"]["status"], "ready");
}

#[tokio::test]
async fn test_customization_drops_empty_options() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/medias/media123/customizations.json"))
        .and(body_json(json!({"playerColor": "ff0000"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playerColor": "ff0000",
            "autoPlay": true
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let response = call(
        &server_for(&mock),
        json!({"op": "create", "resource": "wistia_media_customization", "state": {
            "media_id": "media123",
            "player_color": "ff0000",
            "auto_play": ""
        }}),
    )
    .await;
    assert_eq!(response["ok"], true, "{response}");
    assert_eq!(response["state"]["id"], "media123");
    assert_eq!(response["state"]["player_color"], "ff0000");
    assert_eq!(response["state"]["auto_play"], "true");
}

#[tokio::test]
async fn test_customization_requires_media_id() {
    let mock = MockServer::start().await;
    let response = call(
        &server_for(&mock),
        json!({"op": "create", "resource": "wistia_media_customization",
               "state": {"player_color": "ff0000"}}),
    )
    .await;
    assert_eq!(response["ok"], false);
    assert!(response["error"].as_str().unwrap().contains("media_id"));
}

#[tokio::test]
async fn test_serve_over_streams() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/medias/media123/customizations.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"volume": 0.5})))
        .expect(1)
        .mount(&mock)
        .await;

    let input = concat!(
        r#"{"op":"schema"}"#,
        "\n",
        r#"{"op":"read","resource":"wistia_media_customization","state":{"id":"media123"}}"#,
        "\n"
    );
    let mut output = Vec::new();
    server_for(&mock)
        .serve(input.as_bytes(), &mut output)
        .await
        .unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["schemas"].as_array().unwrap().len(), 3);
    assert_eq!(responses[1]["state"]["media_id"], "media123");
    assert_eq!(responses[1]["state"]["volume"], "0.5");
}
