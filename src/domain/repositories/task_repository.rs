// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::extraction::JobState;
use crate::domain::models::task::{NewTask, Task};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 记录中保存了无法识别的任务状态
    #[error("Unknown job state in record: {0}")]
    InvalidState(String),
}

/// 任务仓库特质
///
/// 定义任务跟踪记录的数据访问接口
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 记录新任务
    async fn create(&self, task: &NewTask) -> Result<Task, RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, RepositoryError>;
    /// 根据工作器任务ID查找任务
    async fn find_by_task_id(&self, task_id: &str) -> Result<Option<Task>, RepositoryError>;
    /// 按插入顺序列出用户的所有任务
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, RepositoryError>;
    /// 更新任务状态
    async fn update_state(&self, id: i32, state: JobState) -> Result<Task, RepositoryError>;
}
