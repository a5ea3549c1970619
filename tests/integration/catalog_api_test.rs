// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, user};
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn template_server_expands_params_string() {
    let app = create_test_app().await;

    let mut ids = Vec::new();
    for name in ["hostname", "port", "timeout"] {
        let parameter = app
            .server
            .post("/v1/parameters")
            .json(&json!({ "name": name, "category": 1 }))
            .await
            .json::<Value>();
        ids.push(parameter["id"].as_i64().unwrap());
    }

    let response = app
        .server
        .post("/v1/template-servers")
        .json(&json!({
            "name": "ssh",
            "category": 1,
            "params": serde_json::to_string(&ids).unwrap(),
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let template = response.json::<Value>();
    assert_eq!(template["parameters"], json!(ids));

    let fetched = app
        .server
        .get(&format!("/v1/template-servers/{}", template["id"]))
        .await
        .json::<Value>();
    assert_eq!(fetched["parameters"], json!(ids));
}

#[tokio::test]
async fn template_server_rejects_unknown_parameter() {
    let app = create_test_app().await;

    app.server
        .post("/v1/template-servers")
        .json(&json!({ "name": "ssh", "category": 1, "params": "[42]" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn server_profile_requires_existing_template() {
    let app = create_test_app().await;

    app.server
        .post("/v1/server-profiles")
        .json(&json!({ "name": "lab", "template": 99, "config": {} }))
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let template = app
        .server
        .post("/v1/template-servers")
        .json(&json!({ "name": "ssh", "category": 1 }))
        .await
        .json::<Value>();
    let profile = app
        .server
        .post("/v1/server-profiles")
        .json(&json!({
            "name": "lab",
            "template": template["id"],
            "config": { "hostname": "10.0.0.1" },
        }))
        .await;
    profile.assert_status(StatusCode::CREATED);
    assert_eq!(profile.json::<Value>()["config"]["hostname"], "10.0.0.1");
}

#[tokio::test]
async fn keyword_owner_defaults_to_request_user() {
    let app = create_test_app().await;
    let (header, value) = user(9);

    let response = app
        .server
        .post("/v1/keywords")
        .add_header(header, value)
        .json(&json!({ "name": "Login", "script": { "steps": ["open", "type"] } }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let keyword = response.json::<Value>();
    assert_eq!(keyword["user_id"], 9);
    assert_eq!(keyword["script"]["steps"][1], "type");

    let collection = app
        .server
        .post("/v1/collections")
        .json(&json!({ "name": "Smoke", "keywords": [keyword["id"]] }))
        .await;
    collection.assert_status(StatusCode::CREATED);
    assert_eq!(collection.json::<Value>()["keywords"], json!([keyword["id"]]));

    app.server
        .delete(&format!("/v1/keywords/{}", keyword["id"]))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get(&format!("/v1/keywords/{}", keyword["id"]))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn keyword_create_requires_user_header() {
    let app = create_test_app().await;

    app.server
        .post("/v1/keywords")
        .json(&json!({ "name": "Login" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn basic_command_listing_omits_relations() {
    let app = create_test_app().await;

    let command = app
        .server
        .post("/v1/commands")
        .json(&json!({ "name": "show version", "description": "Print version" }))
        .await
        .json::<Value>();
    app.server
        .post("/v1/arguments")
        .json(&json!({ "command": command["id"], "name": "--brief" }))
        .await
        .assert_status(StatusCode::CREATED);

    let basic = app.server.get("/v1/commands/basic").await.json::<Vec<Value>>();
    assert_eq!(
        basic,
        vec![json!({
            "id": command["id"],
            "name": "show version",
            "description": "Print version",
        })]
    );

    let nested = app.server.get("/v1/commands").await.json::<Vec<Value>>();
    assert_eq!(nested[0]["arguments"][0]["name"], "--brief");
    assert_eq!(nested[0]["source"], json!([]));
}
