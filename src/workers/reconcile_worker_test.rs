use super::*;
use crate::domain::models::extraction::{JobHandle, JobState, UntrackedJob};
use crate::domain::models::task::Task;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::connection::create_memory_pool;
use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use crate::queue::extraction_queue::InMemoryExtractionQueue;
use async_trait::async_trait;
use sea_orm::DbErr;
use std::sync::atomic::{AtomicUsize, Ordering};

fn untracked(owner: i32, task_id: &str) -> UntrackedJob {
    UntrackedJob {
        owner,
        name: "Extract commands from robot".to_string(),
        handle: JobHandle {
            task_id: task_id.to_string(),
            state: JobState::Pending,
        },
    }
}

async fn setup() -> (
    ReconcileWorker<TaskRepositoryImpl>,
    Arc<TaskRepositoryImpl>,
    Arc<InMemoryExtractionQueue>,
) {
    let db = Arc::new(create_memory_pool().await.unwrap());
    let repository = Arc::new(TaskRepositoryImpl::new(db));
    let queue = Arc::new(InMemoryExtractionQueue::new());
    let worker = ReconcileWorker::new(repository.clone(), queue.clone(), Duration::from_secs(1));
    (worker, repository, queue)
}

#[tokio::test]
async fn test_reconcile_records_untracked_jobs() {
    let (worker, repository, queue) = setup().await;
    queue.mark_untracked(&untracked(4, "job-a")).await.unwrap();
    queue.mark_untracked(&untracked(4, "job-b")).await.unwrap();

    let recorded = worker.reconcile_once().await.unwrap();

    assert_eq!(recorded, 2);
    let tasks = repository.list_for_user(4).await.unwrap();
    assert_eq!(
        tasks.iter().map(|t| t.task_id.as_str()).collect::<Vec<_>>(),
        vec!["job-a", "job-b"]
    );
    assert_eq!(worker.reconcile_once().await.unwrap(), 0);
}

#[tokio::test]
async fn test_reconcile_skips_already_recorded_jobs() {
    let (worker, repository, queue) = setup().await;
    let job = untracked(4, "job-a");
    repository
        .create(&NewTask::new(job.owner, &job.name, &job.handle))
        .await
        .unwrap();
    queue.mark_untracked(&job).await.unwrap();

    assert_eq!(worker.reconcile_once().await.unwrap(), 0);
    assert_eq!(repository.list_for_user(4).await.unwrap().len(), 1);
}

/// 前 `creates_left` 次写入成功，之后全部失败
struct FlakyTaskRepository {
    inner: Arc<TaskRepositoryImpl>,
    creates_left: AtomicUsize,
}

#[async_trait]
impl TaskRepository for FlakyTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<Task, RepositoryError> {
        let allowed = self
            .creates_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(RepositoryError::Database(DbErr::Custom(
                "database is locked".to_string(),
            )));
        }
        self.inner.create(task).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_task_id(&self, task_id: &str) -> Result<Option<Task>, RepositoryError> {
        self.inner.find_by_task_id(task_id).await
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, RepositoryError> {
        self.inner.list_for_user(user_id).await
    }

    async fn update_state(&self, id: i32, state: JobState) -> Result<Task, RepositoryError> {
        self.inner.update_state(id, state).await
    }
}

#[tokio::test]
async fn test_failed_write_returns_remaining_jobs_to_queue() {
    let (worker, repository, queue) = setup().await;
    for task_id in ["job-a", "job-b", "job-c"] {
        queue.mark_untracked(&untracked(4, task_id)).await.unwrap();
    }
    let flaky = ReconcileWorker::new(
        Arc::new(FlakyTaskRepository {
            inner: repository.clone(),
            creates_left: AtomicUsize::new(1),
        }),
        queue.clone(),
        Duration::from_secs(1),
    );

    assert!(flaky.reconcile_once().await.is_err());
    assert_eq!(repository.list_for_user(4).await.unwrap().len(), 1);

    // 失败的任务和之后未处理的任务都回到列表
    let requeued = queue.take_untracked(10).await.unwrap();
    let mut requeued_ids: Vec<_> = requeued.iter().map(|j| j.handle.task_id.clone()).collect();
    requeued_ids.sort();
    assert_eq!(requeued_ids, vec!["job-b", "job-c"]);
    for job in &requeued {
        queue.mark_untracked(job).await.unwrap();
    }

    assert_eq!(worker.reconcile_once().await.unwrap(), 2);
    assert_eq!(worker.reconcile_once().await.unwrap(), 0);
    let mut recorded: Vec<_> = repository
        .list_for_user(4)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.task_id)
        .collect();
    recorded.sort();
    assert_eq!(recorded, vec!["job-a", "job-b", "job-c"]);
}

#[tokio::test]
async fn test_failed_first_write_requeues_every_job() {
    let (worker, repository, queue) = setup().await;
    for task_id in ["job-a", "job-b", "job-c"] {
        queue.mark_untracked(&untracked(4, task_id)).await.unwrap();
    }
    let broken = ReconcileWorker::new(
        Arc::new(FlakyTaskRepository {
            inner: repository.clone(),
            creates_left: AtomicUsize::new(0),
        }),
        queue.clone(),
        Duration::from_secs(1),
    );

    assert!(broken.reconcile_once().await.is_err());
    assert!(repository.list_for_user(4).await.unwrap().is_empty());

    assert_eq!(worker.reconcile_once().await.unwrap(), 3);
    assert_eq!(worker.reconcile_once().await.unwrap(), 0);
    assert_eq!(repository.list_for_user(4).await.unwrap().len(), 3);
}
