// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::command::SourceDeletion;
use crate::domain::models::source::{NewSource, Source, SourceCategory};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;

/// 数据源仓库特质
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// 创建数据源
    async fn create(&self, source: &NewSource) -> Result<Source, RepositoryError>;
    /// 根据ID查找数据源
    async fn find_by_id(&self, id: i32) -> Result<Option<Source>, RepositoryError>;
    /// 批量查找数据源，忽略不存在的ID
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Source>, RepositoryError>;
    /// 列出数据源，可按类别过滤
    async fn list(&self, category: Option<SourceCategory>)
        -> Result<Vec<Source>, RepositoryError>;
    /// 更新数据源的名称、描述和类别配置
    async fn update(&self, source: &Source) -> Result<Source, RepositoryError>;
    /// 删除数据源，并清理只被它引用的命令及其参数
    async fn delete(&self, id: i32) -> Result<SourceDeletion, RepositoryError>;
}
