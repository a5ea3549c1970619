// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::mock_queue::UnreachableQueue;
use super::helpers::{create_test_app, create_test_server_with_queue, user};
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

fn library_form(name: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", name)
        .add_text("description", "Browser keywords")
        .add_text("url", "https://robotframework.org/SeleniumLibrary/")
}

async fn create_library(server: &TestServer, user_id: i32, name: &str) -> Value {
    let (header, value) = user(user_id);
    let response = server
        .post("/v1/source-list/libraries")
        .add_header(header, value)
        .multipart(library_form(name))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn health_check_works() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn create_library_source_records_task() {
    let app = create_test_app().await;

    let body = create_library(&app.server, 7, "SeleniumLibrary").await;

    assert_eq!(
        body["message"],
        "Library SeleniumLibrary created and running the extract"
    );
    assert_eq!(body["source"]["category"], 5);
    assert_eq!(body["state"], "PENDING");
    assert_eq!(body["task"]["task_id"], body["task_id"]);
    assert_eq!(body["task"]["name"], "Extract commands from libraries");

    let submitted = app.queue.submitted().await;
    assert_eq!(submitted.len(), 1);
    assert_eq!(json!(submitted[0].0), body["task_id"]);
    let payload = submitted[0].1.config.to_payload();
    assert_eq!(payload["url"], "https://robotframework.org/SeleniumLibrary/");

    let (header, value) = user(7);
    let tasks = app
        .server
        .get("/v1/tasks")
        .add_header(header, value)
        .await
        .json::<Vec<Value>>();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["task_id"], body["task_id"]);
}

#[tokio::test]
async fn create_source_requires_user_header() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/source-list/libraries")
        .multipart(library_form("SeleniumLibrary"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(app.queue.submitted().await.is_empty());
}

#[tokio::test]
async fn unknown_slug_returns_not_found() {
    let app = create_test_app().await;
    let (header, value) = user(7);

    let response = app
        .server
        .post("/v1/source-list/servers")
        .add_header(header, value)
        .multipart(library_form("SeleniumLibrary"))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let listing = app
        .server
        .get("/v1/source-list/servers")
        .expect_failure()
        .await;
    listing.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_library_url_is_rejected() {
    let app = create_test_app().await;
    let (header, value) = user(7);

    let form = MultipartForm::new()
        .add_text("name", "Broken")
        .add_text("url", "not a url");
    let response = app
        .server
        .post("/v1/source-list/libraries")
        .add_header(header, value)
        .multipart(form)
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let sources = app.server.get("/v1/sources").await.json::<Vec<Value>>();
    assert!(sources.is_empty());
}

#[tokio::test]
async fn robot_source_saves_uploaded_archive() {
    let app = create_test_app().await;
    let (header, value) = user(3);

    let archive = Part::bytes(b"PK\x03\x04suite".to_vec())
        .file_name("suite.zip")
        .mime_type("application/zip");
    let form = MultipartForm::new()
        .add_text("description", "Regression suite")
        .add_part("zip_file", archive);
    let response = app
        .server
        .post("/v1/source-list/robot")
        .add_header(header, value)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(
        body["message"],
        "Robot Framework Source created and running the extract"
    );
    assert_eq!(body["source"]["name"], "Robot Framework");
    assert_eq!(body["source"]["zip_file"], "/media/zip/suite.zip");
    assert_eq!(
        app.storage.get("zip/suite.zip").await,
        Some(b"PK\x03\x04suite".to_vec())
    );

    let submitted = app.queue.submitted().await;
    assert_eq!(submitted[0].1.config.to_payload()["zip"], "/media/zip/suite.zip");
}

#[tokio::test]
async fn robot_source_without_archive_persists_nothing() {
    let app = create_test_app().await;
    let (header, value) = user(3);

    let response = app
        .server
        .post("/v1/source-list/robot")
        .add_header(header, value)
        .multipart(MultipartForm::new().add_text("description", "No archive"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let listing = app.server.get("/v1/source-list/robot").await.json::<Value>();
    assert_eq!(listing["title"], "Robot Framework");
    assert_eq!(listing["sources"], json!([]));
    assert!(app.queue.submitted().await.is_empty());
}

#[tokio::test]
async fn failed_dispatch_keeps_source_and_creates_no_task() {
    let server = create_test_server_with_queue(Arc::new(UnreachableQueue)).await;
    let (header, value) = user(7);

    let response = server
        .post("/v1/source-list/libraries")
        .add_header(header, value)
        .multipart(library_form("SeleniumLibrary"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().starts_with("Error "));
    assert_eq!(body["source"]["name"], "SeleniumLibrary");

    let sources = server.get("/v1/sources").await.json::<Vec<Value>>();
    assert_eq!(sources.len(), 1);

    let (header, value) = user(7);
    let tasks = server
        .get("/v1/tasks")
        .add_header(header, value)
        .await
        .json::<Vec<Value>>();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn update_source_keeps_category() {
    let app = create_test_app().await;
    let created = create_library(&app.server, 7, "SeleniumLibrary").await;
    let id = created["source"]["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/v1/sources/{}", id))
        .json(&json!({
            "name": "Browser",
            "url": "https://robotframework.org/Browser/",
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["source"]["name"], "Browser");
    assert_eq!(body["source"]["category"], 5);

    let rejected = app
        .server
        .put(&format!("/v1/sources/{}", id))
        .json(&json!({
            "name": "Browser",
            "url": "https://robotframework.org/Browser/",
            "category": 3,
        }))
        .expect_failure()
        .await;
    rejected.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_sole_source_removes_its_commands() {
    let app = create_test_app().await;
    let first = create_library(&app.server, 7, "SeleniumLibrary").await["source"]["id"].clone();
    let second = create_library(&app.server, 7, "Browser").await["source"]["id"].clone();

    let owned = app
        .server
        .post("/v1/commands")
        .json(&json!({ "name": "Open Browser", "source": [first] }))
        .await
        .json::<Value>();
    let shared = app
        .server
        .post("/v1/commands")
        .json(&json!({ "name": "Click Element", "source": [first, second] }))
        .await
        .json::<Value>();
    app.server
        .post("/v1/arguments")
        .json(&json!({ "command": owned["id"], "name": "url", "needs_value": true }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.delete(&format!("/v1/sources/{}", first)).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Robot Framework Source and his commands deleted");
    assert_eq!(body["removed_commands"], json!([owned["id"]]));
    assert_eq!(body["retained_commands"], json!([shared["id"]]));

    app.server
        .get(&format!("/v1/commands/{}", owned["id"]))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let arguments = app
        .server
        .get("/v1/arguments")
        .await
        .json::<Vec<Value>>();
    assert!(arguments.is_empty());

    let kept = app
        .server
        .get(&format!("/v1/commands/{}", shared["id"]))
        .await
        .json::<Value>();
    assert_eq!(kept["source"].as_array().unwrap().len(), 1);
    assert_eq!(kept["source"][0]["id"], second);
}

#[tokio::test]
async fn deleting_missing_source_returns_not_found() {
    let app = create_test_app().await;

    app.server
        .delete("/v1/sources/404")
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
