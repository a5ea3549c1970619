// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, user, PLATFORM_VERSION};
use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use commandhub::domain::models::extraction::JobState;
use serde_json::Value;

async fn launch_extraction(app: &super::helpers::TestApp, user_id: i32) -> Value {
    let (header, value) = user(user_id);
    let form = MultipartForm::new()
        .add_text("name", "Collections")
        .add_text("url", "https://robotframework.org/robotframework/latest/libraries/Collections.html");
    let response = app
        .server
        .post("/v1/source-list/libraries")
        .add_header(header, value)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["task"].clone()
}

#[tokio::test]
async fn refresh_reads_state_from_queue() {
    let app = create_test_app().await;
    let task = launch_extraction(&app, 5).await;
    app.queue
        .set_state(task["task_id"].as_str().unwrap(), JobState::Success)
        .await;

    let (header, value) = user(5);
    let response = app
        .server
        .post(&format!("/v1/tasks/{}/refresh", task["id"]))
        .add_header(header, value)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["state"], "SUCCESS");

    let (header, value) = user(5);
    let tasks = app
        .server
        .get("/v1/tasks")
        .add_header(header, value)
        .await
        .json::<Vec<Value>>();
    assert_eq!(tasks[0]["state"], "SUCCESS");
}

#[tokio::test]
async fn refresh_hides_other_users_tasks() {
    let app = create_test_app().await;
    let task = launch_extraction(&app, 5).await;

    let (header, value) = user(6);
    app.server
        .post(&format!("/v1/tasks/{}/refresh", task["id"]))
        .add_header(header, value)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_lists_user_tasks_and_version() {
    let app = create_test_app().await;
    launch_extraction(&app, 5).await;
    launch_extraction(&app, 5).await;
    launch_extraction(&app, 8).await;

    let (header, value) = user(5);
    let home = app
        .server
        .get("/v1/home")
        .add_header(header, value)
        .await
        .json::<Value>();

    assert_eq!(home["platform_version"], PLATFORM_VERSION);
    assert_eq!(home["user_tasks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_user_header_is_rejected() {
    let app = create_test_app().await;

    app.server
        .get("/v1/tasks")
        .add_header(
            axum::http::HeaderName::from_static("x-user-id"),
            axum::http::HeaderValue::from_static("abc"),
        )
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn version_endpoint_responds() {
    let app = create_test_app().await;

    let response = app.server.get("/v1/version").await;

    response.assert_status_ok();
    assert_eq!(response.text(), PLATFORM_VERSION);
}
