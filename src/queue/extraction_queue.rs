// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{ExtractionSettings, RedisSettings};
use crate::domain::models::extraction::{ExtractionRequest, JobHandle, JobState, UntrackedJob};
use crate::infrastructure::redis_client::RedisClient;
use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 队列后端不可达或拒绝了请求
    #[error("Queue backend error: {0}")]
    Backend(#[from] anyhow::Error),

    /// 负载无法序列化
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 工作器写回了无法识别的状态
    #[error("Unknown job state: {0}")]
    UnknownState(String),
}

/// 提取任务队列特质
///
/// 外部工作器从队列中取出 `run_extract` 任务并写回状态。
#[async_trait]
pub trait ExtractionQueue: Send + Sync {
    /// 提交提取任务，不等待执行结果
    async fn submit(&self, request: &ExtractionRequest) -> Result<JobHandle, QueueError>;

    /// 查询任务的当前状态，未知任务返回 `None`
    async fn state(&self, task_id: &str) -> Result<Option<JobState>, QueueError>;

    /// 记录已提交但未写入跟踪记录的任务
    async fn mark_untracked(&self, job: &UntrackedJob) -> Result<(), QueueError>;

    /// 取出最多 `limit` 个未跟踪任务
    async fn take_untracked(&self, limit: usize) -> Result<Vec<UntrackedJob>, QueueError>;
}

/// Redis提取任务队列实现
///
/// 任务信封以 `LPUSH` 推入队列列表，状态保存在 `{queue}:state:{task_id}`。
pub struct RedisExtractionQueue {
    client: RedisClient,
    queue: String,
}

impl RedisExtractionQueue {
    pub fn new(client: RedisClient, queue: impl Into<String>) -> Self {
        Self {
            client,
            queue: queue.into(),
        }
    }

    fn state_key(&self, task_id: &str) -> String {
        format!("{}:state:{}", self.queue, task_id)
    }

    fn untracked_key(&self) -> String {
        format!("{}:untracked", self.queue)
    }
}

#[async_trait]
impl ExtractionQueue for RedisExtractionQueue {
    async fn submit(&self, request: &ExtractionRequest) -> Result<JobHandle, QueueError> {
        let task_id = Uuid::new_v4().to_string();
        let envelope = json!({
            "id": task_id,
            "task": "run_extract",
            "args": [request.config.to_payload()],
            "owner": request.owner,
            "name": request.name,
        });

        self.client
            .set_forever(&self.state_key(&task_id), &JobState::Pending.to_string())
            .await?;
        self.client
            .lpush(&self.queue, &serde_json::to_string(&envelope)?)
            .await?;

        debug!("Queued extraction job {} on {}", task_id, self.queue);
        Ok(JobHandle {
            task_id,
            state: JobState::Pending,
        })
    }

    async fn state(&self, task_id: &str) -> Result<Option<JobState>, QueueError> {
        match self.client.get(&self.state_key(task_id)).await? {
            Some(raw) => raw.parse::<JobState>().map(Some).map_err(|_| {
                warn!("Task {} has unknown state {:?}", task_id, raw);
                QueueError::UnknownState(raw)
            }),
            None => Ok(None),
        }
    }

    async fn mark_untracked(&self, job: &UntrackedJob) -> Result<(), QueueError> {
        self.client
            .lpush(&self.untracked_key(), &serde_json::to_string(job)?)
            .await?;
        Ok(())
    }

    async fn take_untracked(&self, limit: usize) -> Result<Vec<UntrackedJob>, QueueError> {
        let key = self.untracked_key();
        let mut jobs = Vec::new();

        while jobs.len() < limit {
            let Some(raw) = self.client.rpop(&key).await? else {
                break;
            };
            match serde_json::from_str::<UntrackedJob>(&raw) {
                Ok(job) => jobs.push(job),
                Err(e) => warn!("Dropping malformed untracked job {}: {}", raw, e),
            }
        }

        Ok(jobs)
    }
}

/// 根据配置创建提取任务队列
pub async fn create_extraction_queue(
    settings: &ExtractionSettings,
    redis: &RedisSettings,
) -> Result<Arc<dyn ExtractionQueue>, QueueError> {
    match settings.backend.as_str() {
        "redis" => {
            let client = RedisClient::new(&redis.url).await?;
            info!("Extraction jobs go to Redis list {}", settings.queue);
            Ok(Arc::new(RedisExtractionQueue::new(client, &settings.queue)))
        }
        "memory" => {
            warn!("Using in-memory extraction queue, jobs are never executed");
            Ok(Arc::new(InMemoryExtractionQueue::new()))
        }
        other => Err(QueueError::Backend(anyhow::anyhow!(
            "Unsupported extraction backend: {}",
            other
        ))),
    }
}

/// 内存提取任务队列
///
/// 保存提交的请求和任务状态，不执行任务。用于本地开发和测试。
#[derive(Default)]
pub struct InMemoryExtractionQueue {
    submitted: RwLock<Vec<(String, ExtractionRequest)>>,
    states: RwLock<HashMap<String, JobState>>,
    untracked: RwLock<VecDeque<UntrackedJob>>,
}

impl InMemoryExtractionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已提交的请求及其任务ID，按提交顺序
    pub async fn submitted(&self) -> Vec<(String, ExtractionRequest)> {
        self.submitted.read().await.clone()
    }

    /// 模拟工作器写回状态
    pub async fn set_state(&self, task_id: &str, state: JobState) {
        self.states.write().await.insert(task_id.to_string(), state);
    }
}

#[async_trait]
impl ExtractionQueue for InMemoryExtractionQueue {
    async fn submit(&self, request: &ExtractionRequest) -> Result<JobHandle, QueueError> {
        let task_id = Uuid::new_v4().to_string();
        self.states
            .write()
            .await
            .insert(task_id.clone(), JobState::Pending);
        self.submitted
            .write()
            .await
            .push((task_id.clone(), request.clone()));
        Ok(JobHandle {
            task_id,
            state: JobState::Pending,
        })
    }

    async fn state(&self, task_id: &str) -> Result<Option<JobState>, QueueError> {
        Ok(self.states.read().await.get(task_id).copied())
    }

    async fn mark_untracked(&self, job: &UntrackedJob) -> Result<(), QueueError> {
        self.untracked.write().await.push_front(job.clone());
        Ok(())
    }

    async fn take_untracked(&self, limit: usize) -> Result<Vec<UntrackedJob>, QueueError> {
        let mut untracked = self.untracked.write().await;
        let mut jobs = Vec::new();
        while jobs.len() < limit {
            match untracked.pop_back() {
                Some(job) => jobs.push(job),
                None => break,
            }
        }
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::extraction::ExtractionConfig;
    use crate::domain::models::source::SourceCategory;

    fn request() -> ExtractionRequest {
        let config = ExtractionConfig::Libraries {
            source: 1,
            url: "https://robotframework.org/".to_string(),
        };
        ExtractionRequest::new(7, SourceCategory::Libraries, config)
    }

    #[tokio::test]
    async fn test_in_memory_queue_tracks_state() {
        let queue = InMemoryExtractionQueue::new();
        let handle = queue.submit(&request()).await.unwrap();

        assert_eq!(handle.state, JobState::Pending);
        assert_eq!(
            queue.state(&handle.task_id).await.unwrap(),
            Some(JobState::Pending)
        );

        queue.set_state(&handle.task_id, JobState::Success).await;
        assert_eq!(
            queue.state(&handle.task_id).await.unwrap(),
            Some(JobState::Success)
        );
        assert_eq!(queue.state("missing").await.unwrap(), None);
        assert_eq!(queue.submitted().await.len(), 1);
    }

    #[tokio::test]
    async fn test_untracked_jobs_come_back_oldest_first() {
        let queue = InMemoryExtractionQueue::new();
        for n in 0..3 {
            let job = UntrackedJob {
                owner: 1,
                name: format!("job {}", n),
                handle: JobHandle {
                    task_id: n.to_string(),
                    state: JobState::Pending,
                },
            };
            queue.mark_untracked(&job).await.unwrap();
        }

        let first = queue.take_untracked(2).await.unwrap();
        assert_eq!(
            first.iter().map(|j| j.name.as_str()).collect::<Vec<_>>(),
            vec!["job 0", "job 1"]
        );
        let rest = queue.take_untracked(10).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert!(queue.take_untracked(10).await.unwrap().is_empty());
    }
}
