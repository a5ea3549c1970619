// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use commandhub::config::settings::Settings;
use commandhub::infrastructure::database::connection;
use commandhub::infrastructure::metrics;
use commandhub::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use commandhub::infrastructure::storage::create_storage_repository;
use commandhub::presentation::routes::{self, AppServices};
use commandhub::queue::extraction_queue::create_extraction_queue;
use commandhub::utils::telemetry;
use commandhub::workers::reconcile_worker::ReconcileWorker;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(settings.logging.json);
    info!("Starting commandhub {}...", settings.platform.version);
    metrics::init_metrics(&settings.metrics);

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    info!("Running database migrations...");
    connection::run_migrations(db.as_ref()).await?;

    // 4. Extraction queue and archive storage
    let queue = create_extraction_queue(&settings.extraction, &settings.redis).await?;
    let storage = create_storage_repository(&settings.storage)?;
    info!(
        "Extraction backend {} and storage {} initialized",
        settings.extraction.backend, settings.storage.storage_type
    );

    // 5. Start reconcile worker
    let reconcile_worker = ReconcileWorker::new(
        Arc::new(TaskRepositoryImpl::new(db.clone())),
        queue.clone(),
        Duration::from_secs(settings.extraction.reconcile_interval_secs),
    );
    let _reconciler = reconcile_worker.start();

    // 6. Start HTTP server
    let services = AppServices::new(
        db,
        queue,
        storage,
        &settings.storage.media_url,
        settings.platform.clone(),
    );
    let app = routes::routes(services);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
