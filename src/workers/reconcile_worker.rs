// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::NewTask;
use crate::domain::repositories::task_repository::TaskRepository;
use crate::queue::extraction_queue::ExtractionQueue;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// 每轮最多补录的任务数
const BATCH_SIZE: usize = 100;

/// 未跟踪任务补录工作器
///
/// 定期取出已被队列接受但未写入跟踪记录的任务，为发起用户补写任务记录
pub struct ReconcileWorker<R>
where
    R: TaskRepository + Send + Sync + 'static,
{
    repository: Arc<R>,
    queue: Arc<dyn ExtractionQueue>,
    interval: Duration,
}

impl<R> ReconcileWorker<R>
where
    R: TaskRepository + Send + Sync + 'static,
{
    pub fn new(repository: Arc<R>, queue: Arc<dyn ExtractionQueue>, interval: Duration) -> Self {
        Self {
            repository,
            queue,
            interval,
        }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!("Task reconcile worker started");

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.reconcile_once().await {
                Ok(count) => {
                    if count > 0 {
                        info!("Recorded {} untracked tasks", count);
                    }
                }
                Err(e) => {
                    error!("Failed to reconcile untracked tasks: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 补录一批未跟踪任务，返回写入的记录数
    ///
    /// 已存在记录的任务直接跳过。写入失败时剩余任务放回列表，下一轮重试。
    pub async fn reconcile_once(&self) -> Result<usize, String> {
        let jobs = self
            .queue
            .take_untracked(BATCH_SIZE)
            .await
            .map_err(|e| e.to_string())?;

        let mut recorded = 0;
        let mut pending = jobs.into_iter();
        while let Some(job) = pending.next() {
            let existing = self
                .repository
                .find_by_task_id(&job.handle.task_id)
                .await;

            let result = match existing {
                Ok(Some(_)) => continue,
                Ok(None) => self
                    .repository
                    .create(&NewTask::new(job.owner, &job.name, &job.handle))
                    .await
                    .map(|_| ()),
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                warn!("Could not record task {}: {}", job.handle.task_id, e);
                for job in std::iter::once(job).chain(pending) {
                    self.queue
                        .mark_untracked(&job)
                        .await
                        .map_err(|e| e.to_string())?;
                }
                return Err(e.to_string());
            }
            recorded += 1;
        }

        Ok(recorded)
    }
}

#[cfg(test)]
#[path = "reconcile_worker_test.rs"]
mod tests;
