use super::*;
use crate::application::dto::source_request::{SourceFormData, UploadedFile};
use crate::domain::models::extraction::{ExtractionRequest, JobState, UntrackedJob};
use crate::domain::repositories::task_repository::TaskRepository;
use crate::domain::services::task_tracker::TaskTracker;
use crate::infrastructure::database::connection::create_memory_pool;
use crate::infrastructure::repositories::source_repo_impl::SourceRepositoryImpl;
use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use crate::infrastructure::storage::InMemoryStorage;
use crate::queue::extraction_queue::{ExtractionQueue, InMemoryExtractionQueue, QueueError};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;

struct UnreachableQueue;

#[async_trait]
impl ExtractionQueue for UnreachableQueue {
    async fn submit(&self, _request: &ExtractionRequest) -> Result<JobHandle, QueueError> {
        Err(QueueError::Backend(anyhow::anyhow!("broker unavailable")))
    }

    async fn state(&self, _task_id: &str) -> Result<Option<JobState>, QueueError> {
        Ok(None)
    }

    async fn mark_untracked(&self, _job: &UntrackedJob) -> Result<(), QueueError> {
        Ok(())
    }

    async fn take_untracked(&self, _limit: usize) -> Result<Vec<UntrackedJob>, QueueError> {
        Ok(Vec::new())
    }
}

struct Fixture {
    use_case: SourceUseCase<SourceRepositoryImpl>,
    sources: Arc<SourceRepositoryImpl>,
    tasks: Arc<TaskRepositoryImpl>,
    storage: Arc<InMemoryStorage>,
}

async fn fixture(queue: Arc<dyn ExtractionQueue>) -> Fixture {
    let db = Arc::new(create_memory_pool().await.unwrap());
    let sources = Arc::new(SourceRepositoryImpl::new(db.clone()));
    let tasks = Arc::new(TaskRepositoryImpl::new(db));
    let storage = Arc::new(InMemoryStorage::new());

    let tracker = TaskTracker::new(tasks.clone(), queue.clone());
    let dispatcher = ExtractionDispatcher::new(queue, tracker);
    let archives = ArchiveService::new(storage.clone(), "/media/");

    Fixture {
        use_case: SourceUseCase::new(sources.clone(), dispatcher, archives),
        sources,
        tasks,
        storage,
    }
}

fn library_form() -> CreateSourceDto {
    let mut form = SourceFormData::default();
    form.insert_field("name", "SeleniumLibrary");
    form.insert_field("url", "https://robotframework.org/SeleniumLibrary/");
    CreateSourceDto::from_form(SourceCategory::Libraries, form).unwrap()
}

fn robot_form(archive: Option<UploadedFile>) -> CreateSourceDto {
    CreateSourceDto::RobotFramework {
        description: Some("regression suite".to_string()),
        archive,
    }
}

#[tokio::test]
async fn test_create_records_task_with_worker_id() {
    let queue = Arc::new(InMemoryExtractionQueue::new());
    let fx = fixture(queue.clone()).await;

    let created = fx.use_case.create(3, library_form()).await.unwrap();

    let tasks = fx.tasks.list_for_user(3).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].task_id, created.handle.task_id);
    assert_eq!(tasks[0].name, "Extract commands from libraries");
    assert_eq!(
        created.message,
        "Library SeleniumLibrary created and running the extract"
    );

    let submitted = queue.submitted().await;
    assert_eq!(
        submitted[0].1.config.to_payload(),
        json!({
            "category": 5,
            "source": created.source.id,
            "url": "https://robotframework.org/SeleniumLibrary/",
        })
    );
}

#[tokio::test]
async fn test_failed_dispatch_keeps_source_without_task() {
    let fx = fixture(Arc::new(UnreachableQueue)).await;

    let err = fx.use_case.create(3, library_form()).await.unwrap_err();

    let SourceUseCaseError::DispatchFailed { created, .. } = &err else {
        panic!("expected a dispatch failure, got {:?}", err);
    };
    assert!(fx.sources.find_by_id(created.id).await.unwrap().is_some());
    assert!(fx.tasks.list_for_user(3).await.unwrap().is_empty());

    let (status, message) = <(StatusCode, String)>::from(err);
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(message.starts_with("Error "));
    assert!(message.contains("broker unavailable"));
}

#[tokio::test]
async fn test_robot_source_saves_archive_and_fixes_name() {
    let queue = Arc::new(InMemoryExtractionQueue::new());
    let fx = fixture(queue.clone()).await;
    let archive = UploadedFile {
        file_name: "suite.zip".to_string(),
        data: Bytes::from_static(b"PK\x03\x04"),
    };

    let created = fx.use_case.create(1, robot_form(Some(archive))).await.unwrap();

    assert_eq!(created.source.name, "Robot Framework");
    assert_eq!(
        created.source.kind,
        SourceKind::RobotFramework {
            archive: Some("/media/zip/suite.zip".to_string())
        }
    );
    assert!(fx.storage.get("zip/suite.zip").await.is_some());
    assert_eq!(
        created.message,
        "Robot Framework Source created and running the extract"
    );
    assert_eq!(
        queue.submitted().await[0].1.config.to_payload()["zip"],
        "/media/zip/suite.zip"
    );
}

#[tokio::test]
async fn test_robot_source_without_archive_persists_nothing() {
    let queue = Arc::new(InMemoryExtractionQueue::new());
    let fx = fixture(queue.clone()).await;

    let err = fx.use_case.create(1, robot_form(None)).await.unwrap_err();

    assert!(matches!(err, SourceUseCaseError::ValidationError(_)));
    assert!(fx.sources.list(None).await.unwrap().is_empty());
    assert!(queue.submitted().await.is_empty());
}

#[tokio::test]
async fn test_invalid_form_is_rejected_before_persisting() {
    let fx = fixture(Arc::new(InMemoryExtractionQueue::new())).await;
    let mut form = SourceFormData::default();
    form.insert_field("name", "Router OS");
    form.insert_field("regex", "([");
    let dto = CreateSourceDto::from_form(SourceCategory::Products, form).unwrap();

    let err = fx.use_case.create(1, dto).await.unwrap_err();

    assert!(matches!(err, SourceUseCaseError::ValidationError(_)));
    assert!(fx.sources.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_keeps_category() {
    let fx = fixture(Arc::new(InMemoryExtractionQueue::new())).await;
    let created = fx.use_case.create(1, library_form()).await.unwrap();

    let updated = fx
        .use_case
        .update(
            created.source.id,
            json!({
                "name": "Browser",
                "url": "https://robotframework-browser.org/",
            }),
        )
        .await
        .unwrap();
    assert_eq!(updated.category(), SourceCategory::Libraries);
    assert_eq!(updated.name, "Browser");

    // 产品表单字段不属于库数据源
    let err = fx
        .use_case
        .update(
            created.source.id,
            json!({ "name": "x", "url": "https://x.org", "host": "h" }),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SourceUseCaseError::ValidationError(_)));
}

#[tokio::test]
async fn test_list_by_slug() {
    let fx = fixture(Arc::new(InMemoryExtractionQueue::new())).await;
    fx.use_case.create(1, library_form()).await.unwrap();

    let listing = fx.use_case.list_by_slug("libraries").await.unwrap();
    assert_eq!(listing.title, "Robot Framework Libraries");
    assert_eq!(listing.sources.len(), 1);
    assert!(fx.use_case.list_by_slug("robot").await.unwrap().sources.is_empty());
    assert!(matches!(
        fx.use_case.list_by_slug("servers").await,
        Err(SourceUseCaseError::UnknownCategory(_))
    ));
}

#[tokio::test]
async fn test_delete_missing_source() {
    let fx = fixture(Arc::new(InMemoryExtractionQueue::new())).await;
    assert!(matches!(
        fx.use_case.delete(99).await,
        Err(SourceUseCaseError::NotFound)
    ));
}

fn product_form(password: Option<&str>) -> CreateSourceDto {
    let mut form = SourceFormData::default();
    form.insert_field("name", "Router OS");
    form.insert_field("regex", r"^\w+");
    form.insert_field("path", "/system");
    form.insert_field("host", "10.0.0.1");
    if let Some(password) = password {
        form.insert_field("password", password);
    }
    CreateSourceDto::from_form(SourceCategory::Products, form).unwrap()
}

fn stored_password(source: &Source) -> Option<String> {
    match &source.kind {
        SourceKind::Products(settings) => settings.password.clone(),
        other => panic!("expected a product source, got {:?}", other),
    }
}

#[tokio::test]
async fn test_product_update_without_password_keeps_stored_one() {
    let fx = fixture(Arc::new(InMemoryExtractionQueue::new())).await;
    let created = fx.use_case.create(1, product_form(Some("s3cret"))).await.unwrap();
    let id = created.source.id;

    // 编辑表单由响应回填，响应里没有密码
    fx.use_case
        .update(
            id,
            json!({
                "name": "Router OS 7",
                "regex": r"^\w+",
                "path": "/system",
                "host": "10.0.0.2",
            }),
        )
        .await
        .unwrap();
    let stored = fx.sources.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Router OS 7");
    assert_eq!(stored_password(&stored).as_deref(), Some("s3cret"));

    fx.use_case
        .update(
            id,
            json!({
                "name": "Router OS 7",
                "regex": r"^\w+",
                "path": "/system",
                "host": "10.0.0.2",
                "password": "rotated",
            }),
        )
        .await
        .unwrap();
    let stored = fx.sources.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored_password(&stored).as_deref(), Some("rotated"));
}

struct BrokenSourceRepository;

#[async_trait]
impl SourceRepository for BrokenSourceRepository {
    async fn create(&self, _source: &NewSource) -> Result<Source, RepositoryError> {
        Err(RepositoryError::Database(sea_orm::DbErr::Custom(
            "disk full".to_string(),
        )))
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Source>, RepositoryError> {
        Ok(None)
    }

    async fn find_by_ids(&self, _ids: &[i32]) -> Result<Vec<Source>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn list(&self, _category: Option<SourceCategory>) -> Result<Vec<Source>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn update(&self, _source: &Source) -> Result<Source, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    async fn delete(&self, _id: i32) -> Result<SourceDeletion, RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

#[tokio::test]
async fn test_failed_source_insert_removes_saved_archive() {
    let db = Arc::new(create_memory_pool().await.unwrap());
    let queue: Arc<dyn ExtractionQueue> = Arc::new(InMemoryExtractionQueue::new());
    let tasks = Arc::new(TaskRepositoryImpl::new(db));
    let storage = Arc::new(InMemoryStorage::new());
    let dispatcher = ExtractionDispatcher::new(queue.clone(), TaskTracker::new(tasks, queue));
    let use_case = SourceUseCase::new(
        Arc::new(BrokenSourceRepository),
        dispatcher,
        ArchiveService::new(storage.clone(), "/media/"),
    );
    let archive = UploadedFile {
        file_name: "suite.zip".to_string(),
        data: Bytes::from_static(b"PK\x03\x04"),
    };

    let err = use_case.create(1, robot_form(Some(archive))).await.unwrap_err();

    assert!(matches!(err, SourceUseCaseError::Repository(_)));
    assert_eq!(storage.get("zip/suite.zip").await, None);
}
