// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use commandhub::domain::models::extraction::{ExtractionRequest, JobHandle, JobState, UntrackedJob};
use commandhub::queue::extraction_queue::{ExtractionQueue, QueueError};

/// 始终拒绝提交的队列
pub struct UnreachableQueue;

#[async_trait]
impl ExtractionQueue for UnreachableQueue {
    async fn submit(&self, _request: &ExtractionRequest) -> Result<JobHandle, QueueError> {
        Err(QueueError::Backend(anyhow::anyhow!("connection refused")))
    }

    async fn state(&self, _task_id: &str) -> Result<Option<JobState>, QueueError> {
        Err(QueueError::Backend(anyhow::anyhow!("connection refused")))
    }

    async fn mark_untracked(&self, _job: &UntrackedJob) -> Result<(), QueueError> {
        Ok(())
    }

    async fn take_untracked(&self, _limit: usize) -> Result<Vec<UntrackedJob>, QueueError> {
        Ok(Vec::new())
    }
}
