// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::extraction::JobHandle;
use crate::domain::models::task::{NewTask, Task};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::queue::extraction_queue::{ExtractionQueue, QueueError};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TaskTrackerError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// 任务不存在或不属于该用户
    #[error("Task {0} not found")]
    NotFound(i32),
}

/// 任务跟踪服务
///
/// 记录谁发起了哪个异步任务以及任务最后已知的状态
#[derive(Clone)]
pub struct TaskTracker {
    repository: Arc<dyn TaskRepository>,
    queue: Arc<dyn ExtractionQueue>,
}

impl TaskTracker {
    pub fn new(repository: Arc<dyn TaskRepository>, queue: Arc<dyn ExtractionQueue>) -> Self {
        Self { repository, queue }
    }

    /// 为用户记录一个已提交的任务
    pub async fn record(
        &self,
        user_id: i32,
        name: &str,
        handle: &JobHandle,
    ) -> Result<Task, TaskTrackerError> {
        let task = self
            .repository
            .create(&NewTask::new(user_id, name, handle))
            .await?;
        debug!("Recorded task {} for user {}", task.task_id, user_id);
        Ok(task)
    }

    /// 按插入顺序列出用户的任务
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, TaskTrackerError> {
        Ok(self.repository.list_for_user(user_id).await?)
    }

    /// 从队列读取任务的当前状态并保存
    ///
    /// 队列中已没有该任务的状态时保留原状态。
    pub async fn refresh(&self, user_id: i32, id: i32) -> Result<Task, TaskTrackerError> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .filter(|task| task.user_id == user_id)
            .ok_or(TaskTrackerError::NotFound(id))?;

        match self.queue.state(&task.task_id).await? {
            Some(state) if state != task.state => {
                Ok(self.repository.update_state(task.id, state).await?)
            }
            _ => Ok(task),
        }
    }
}

#[cfg(test)]
#[path = "task_tracker_test.rs"]
mod tests;
