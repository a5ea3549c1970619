// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::PlatformSettings;
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::domain::services::archive_service::ArchiveService;
use crate::domain::services::extraction_dispatcher::ExtractionDispatcher;
use crate::domain::services::task_tracker::TaskTracker;
use crate::infrastructure::repositories::command_repo_impl::CommandRepositoryImpl;
use crate::infrastructure::repositories::server_repo_impl::ServerRepositoryImpl;
use crate::infrastructure::repositories::source_repo_impl::SourceRepositoryImpl;
use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use crate::infrastructure::repositories::testing_repo_impl::TestingRepositoryImpl;
use crate::presentation::handlers::{
    command_handler, server_handler, source_handler, task_handler, testing_handler,
};
use crate::queue::extraction_queue::ExtractionQueue;
use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 上传压缩包的最大尺寸
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

type Sources = SourceRepositoryImpl;
type Commands = CommandRepositoryImpl;
type Servers = ServerRepositoryImpl;
type Testing = TestingRepositoryImpl;

/// 路由依赖的服务和仓库
#[derive(Clone)]
pub struct AppServices {
    pub sources: Arc<SourceRepositoryImpl>,
    pub commands: Arc<CommandRepositoryImpl>,
    pub servers: Arc<ServerRepositoryImpl>,
    pub testing: Arc<TestingRepositoryImpl>,
    pub tracker: TaskTracker,
    pub dispatcher: ExtractionDispatcher,
    pub archives: ArchiveService,
    pub platform: Arc<PlatformSettings>,
}

impl AppServices {
    pub fn new(
        db: Arc<DatabaseConnection>,
        queue: Arc<dyn ExtractionQueue>,
        storage: Arc<dyn StorageRepository>,
        media_url: &str,
        platform: PlatformSettings,
    ) -> Self {
        let tasks = Arc::new(TaskRepositoryImpl::new(db.clone()));
        let tracker = TaskTracker::new(tasks, queue.clone());

        Self {
            sources: Arc::new(SourceRepositoryImpl::new(db.clone())),
            commands: Arc::new(CommandRepositoryImpl::new(db.clone())),
            servers: Arc::new(ServerRepositoryImpl::new(db.clone())),
            testing: Arc::new(TestingRepositoryImpl::new(db)),
            dispatcher: ExtractionDispatcher::new(queue, tracker.clone()),
            tracker,
            archives: ArchiveService::new(storage, media_url),
            platform: Arc::new(platform),
        }
    }
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回挂载了全部服务的路由
pub fn routes(services: AppServices) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let source_routes = Router::new()
        .route(
            "/v1/source-list/{slug}",
            get(source_handler::list_by_slug::<Sources>)
                .post(source_handler::create_source::<Sources>),
        )
        .route("/v1/sources", get(source_handler::list_sources::<Sources>))
        .route(
            "/v1/sources/{id}",
            get(source_handler::get_source::<Sources>)
                .put(source_handler::update_source::<Sources>)
                .delete(source_handler::delete_source::<Sources>),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    let command_routes = Router::new()
        .route(
            "/v1/commands",
            get(command_handler::list_commands::<Commands, Sources>)
                .post(command_handler::create_command::<Commands, Sources>),
        )
        .route(
            "/v1/commands/basic",
            get(command_handler::list_basic_commands::<Commands, Sources>),
        )
        .route(
            "/v1/commands/{id}",
            get(command_handler::get_command::<Commands, Sources>)
                .put(command_handler::update_command::<Commands, Sources>)
                .delete(command_handler::delete_command::<Commands, Sources>),
        )
        .route(
            "/v1/arguments",
            get(command_handler::list_arguments::<Commands, Sources>)
                .post(command_handler::create_argument::<Commands, Sources>),
        )
        .route(
            "/v1/arguments/{id}",
            get(command_handler::get_argument::<Commands, Sources>)
                .put(command_handler::update_argument::<Commands, Sources>)
                .delete(command_handler::delete_argument::<Commands, Sources>),
        );

    let task_routes = Router::new()
        .route("/v1/home", get(task_handler::home))
        .route("/v1/tasks", get(task_handler::list_tasks))
        .route("/v1/tasks/{id}/refresh", post(task_handler::refresh_task));

    let server_routes = Router::new()
        .route(
            "/v1/parameters",
            get(server_handler::list_parameters::<Servers>)
                .post(server_handler::create_parameter::<Servers>),
        )
        .route(
            "/v1/parameters/{id}",
            get(server_handler::get_parameter::<Servers>)
                .delete(server_handler::delete_parameter::<Servers>),
        )
        .route(
            "/v1/template-servers",
            get(server_handler::list_templates::<Servers>)
                .post(server_handler::create_template::<Servers>),
        )
        .route(
            "/v1/template-servers/{id}",
            get(server_handler::get_template::<Servers>)
                .delete(server_handler::delete_template::<Servers>),
        )
        .route(
            "/v1/server-profiles",
            get(server_handler::list_profiles::<Servers>)
                .post(server_handler::create_profile::<Servers>),
        )
        .route(
            "/v1/server-profiles/{id}",
            get(server_handler::get_profile::<Servers>)
                .delete(server_handler::delete_profile::<Servers>),
        );

    let testing_routes = Router::new()
        .route(
            "/v1/keywords",
            get(testing_handler::list_keywords::<Testing>)
                .post(testing_handler::create_keyword::<Testing>),
        )
        .route(
            "/v1/keywords/{id}",
            get(testing_handler::get_keyword::<Testing>)
                .delete(testing_handler::delete_keyword::<Testing>),
        )
        .route(
            "/v1/collections",
            get(testing_handler::list_collections::<Testing>)
                .post(testing_handler::create_collection::<Testing>),
        )
        .route(
            "/v1/collections/{id}",
            get(testing_handler::get_collection::<Testing>)
                .delete(testing_handler::delete_collection::<Testing>),
        );

    Router::new()
        .merge(public_routes)
        .merge(source_routes)
        .merge(command_routes)
        .merge(task_routes)
        .merge(server_routes)
        .merge(testing_routes)
        .layer(Extension(services.sources))
        .layer(Extension(services.commands))
        .layer(Extension(services.servers))
        .layer(Extension(services.testing))
        .layer(Extension(services.tracker))
        .layer(Extension(services.dispatcher))
        .layer(Extension(services.archives))
        .layer(Extension(services.platform))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点，返回配置中的平台版本
pub async fn version(Extension(platform): Extension<Arc<PlatformSettings>>) -> String {
    platform.version.clone()
}
