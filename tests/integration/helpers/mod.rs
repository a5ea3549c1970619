// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod mock_queue;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use commandhub::config::settings::PlatformSettings;
use commandhub::infrastructure::database::connection::create_memory_pool;
use commandhub::infrastructure::storage::InMemoryStorage;
use commandhub::presentation::routes::{routes, AppServices};
use commandhub::queue::extraction_queue::{ExtractionQueue, InMemoryExtractionQueue};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub const PLATFORM_VERSION: &str = "1.4.0-test";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub queue: Arc<InMemoryExtractionQueue>,
    pub storage: Arc<InMemoryStorage>,
}

pub async fn create_test_app() -> TestApp {
    let queue = Arc::new(InMemoryExtractionQueue::new());
    let (server, db, storage) = build_server(queue.clone()).await;
    TestApp {
        server,
        db,
        queue,
        storage,
    }
}

/// 使用自定义队列构建测试服务
pub async fn create_test_server_with_queue(queue: Arc<dyn ExtractionQueue>) -> TestServer {
    build_server(queue).await.0
}

async fn build_server(
    queue: Arc<dyn ExtractionQueue>,
) -> (TestServer, Arc<DatabaseConnection>, Arc<InMemoryStorage>) {
    let db = Arc::new(create_memory_pool().await.unwrap());
    let storage = Arc::new(InMemoryStorage::new());
    let services = AppServices::new(
        db.clone(),
        queue,
        storage.clone(),
        "/media/",
        PlatformSettings {
            version: PLATFORM_VERSION.to_string(),
        },
    );

    let server = TestServer::new(routes(services)).unwrap();
    (server, db, storage)
}

/// 用户身份请求头
pub fn user(id: i32) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_str(&id.to_string()).unwrap(),
    )
}
