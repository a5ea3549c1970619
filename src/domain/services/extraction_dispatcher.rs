// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::extraction::{
    ExtractionConfig, ExtractionRequest, JobHandle, UntrackedJob,
};
use crate::domain::models::source::{DomainError, Source};
use crate::domain::models::task::Task;
use crate::domain::services::task_tracker::TaskTracker;
use crate::infrastructure::metrics::{
    EXTRACTION_DISPATCHED, EXTRACTION_DISPATCH_FAILED, EXTRACTION_UNTRACKED,
};
use crate::queue::extraction_queue::{ExtractionQueue, QueueError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum DispatchError {
    /// 数据源缺少提取所需的字段
    #[error(transparent)]
    Invalid(#[from] DomainError),
    /// 队列不可达或拒绝了负载
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// 一次提交的结果
///
/// `task` 为 `None` 表示任务已被队列接受，但跟踪记录尚未写入，
/// 由补录工作器稍后完成。
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub handle: JobHandle,
    pub task: Option<Task>,
}

/// 提取任务调度器
///
/// 按数据源类别构建提取配置，提交给外部工作器，并为发起用户记录任务。
#[derive(Clone)]
pub struct ExtractionDispatcher {
    queue: Arc<dyn ExtractionQueue>,
    tracker: TaskTracker,
}

impl ExtractionDispatcher {
    pub fn new(queue: Arc<dyn ExtractionQueue>, tracker: TaskTracker) -> Self {
        Self { queue, tracker }
    }

    /// 为数据源提交提取任务
    ///
    /// 提交失败时不创建任务记录。记录写入失败时任务被放入未跟踪列表，
    /// 调用方仍然得到成功结果。
    pub async fn dispatch(
        &self,
        owner: i32,
        source: &Source,
    ) -> Result<DispatchOutcome, DispatchError> {
        let config = ExtractionConfig::for_source(source)?;
        let request = ExtractionRequest::new(owner, source.category(), config);

        let handle = match self.queue.submit(&request).await {
            Ok(handle) => handle,
            Err(e) => {
                metrics::counter!(EXTRACTION_DISPATCH_FAILED).increment(1);
                error!("Failed to dispatch extraction for source {}: {}", source.id, e);
                return Err(e.into());
            }
        };
        metrics::counter!(EXTRACTION_DISPATCHED).increment(1);
        info!(
            "Dispatched extraction {} for source {} ({})",
            handle.task_id,
            source.id,
            source.category()
        );

        let task = match self.tracker.record(owner, &request.name, &handle).await {
            Ok(task) => Some(task),
            Err(e) => {
                warn!(
                    "Job {} accepted but task record failed: {}",
                    handle.task_id, e
                );
                self.mark_untracked(owner, &request.name, &handle).await;
                None
            }
        };

        Ok(DispatchOutcome { handle, task })
    }

    async fn mark_untracked(&self, owner: i32, name: &str, handle: &JobHandle) {
        let job = UntrackedJob {
            owner,
            name: name.to_string(),
            handle: handle.clone(),
        };
        metrics::counter!(EXTRACTION_UNTRACKED).increment(1);
        if let Err(e) = self.queue.mark_untracked(&job).await {
            error!("Lost track of job {}: {}", handle.task_id, e);
        }
    }
}

#[cfg(test)]
#[path = "extraction_dispatcher_test.rs"]
mod tests;
