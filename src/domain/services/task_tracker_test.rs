use super::*;
use crate::domain::models::extraction::{ExtractionConfig, ExtractionRequest, JobState};
use crate::domain::models::source::SourceCategory;
use crate::infrastructure::database::connection::create_memory_pool;
use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use crate::queue::extraction_queue::InMemoryExtractionQueue;

async fn setup() -> (TaskTracker, Arc<InMemoryExtractionQueue>) {
    let db = create_memory_pool().await.unwrap();
    let repository = Arc::new(TaskRepositoryImpl::new(Arc::new(db)));
    let queue = Arc::new(InMemoryExtractionQueue::new());
    (TaskTracker::new(repository, queue.clone()), queue)
}

async fn submit(queue: &InMemoryExtractionQueue) -> JobHandle {
    let config = ExtractionConfig::Libraries {
        source: 1,
        url: "https://robotframework.org/".to_string(),
    };
    queue
        .submit(&ExtractionRequest::new(1, SourceCategory::Libraries, config))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_list_for_user_keeps_insertion_order() {
    let (tracker, queue) = setup().await;

    let first = submit(&queue).await;
    let second = submit(&queue).await;
    let other = submit(&queue).await;
    tracker.record(1, "first", &first).await.unwrap();
    tracker.record(1, "second", &second).await.unwrap();
    tracker.record(2, "other", &other).await.unwrap();

    let tasks = tracker.list_for_user(1).await.unwrap();
    assert_eq!(
        tasks.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["first", "second"]
    );
    assert_eq!(tasks[0].task_id, first.task_id);
}

#[tokio::test]
async fn test_refresh_stores_queue_state() {
    let (tracker, queue) = setup().await;
    let handle = submit(&queue).await;
    let task = tracker.record(1, "extract", &handle).await.unwrap();

    queue.set_state(&handle.task_id, JobState::Success).await;
    let refreshed = tracker.refresh(1, task.id).await.unwrap();

    assert_eq!(refreshed.state, JobState::Success);
    assert_eq!(
        tracker.list_for_user(1).await.unwrap()[0].state,
        JobState::Success
    );
}

#[tokio::test]
async fn test_refresh_hides_other_users_tasks() {
    let (tracker, queue) = setup().await;
    let handle = submit(&queue).await;
    let task = tracker.record(1, "extract", &handle).await.unwrap();

    let err = tracker.refresh(2, task.id).await.unwrap_err();
    assert!(matches!(err, TaskTrackerError::NotFound(id) if id == task.id));
}
