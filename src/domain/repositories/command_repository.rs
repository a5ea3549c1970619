// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::command::{Argument, Command, NewArgument, NewCommand};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;

/// 命令与参数仓库特质
#[async_trait]
pub trait CommandRepository: Send + Sync {
    /// 创建命令并关联数据源
    async fn create(&self, command: &NewCommand) -> Result<Command, RepositoryError>;
    /// 根据ID查找命令
    async fn find_by_id(&self, id: i32) -> Result<Option<Command>, RepositoryError>;
    /// 列出所有命令
    async fn list(&self) -> Result<Vec<Command>, RepositoryError>;
    /// 更新命令，数据源关联整体替换
    async fn update(&self, command: &Command) -> Result<Command, RepositoryError>;
    /// 删除命令及其参数和所有数据源关联
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;

    /// 创建参数
    async fn create_argument(&self, argument: &NewArgument) -> Result<Argument, RepositoryError>;
    /// 根据ID查找参数
    async fn find_argument(&self, id: i32) -> Result<Option<Argument>, RepositoryError>;
    /// 列出参数，可按命令过滤
    async fn list_arguments(&self, command_id: Option<i32>)
        -> Result<Vec<Argument>, RepositoryError>;
    /// 更新参数
    async fn update_argument(&self, argument: &Argument) -> Result<Argument, RepositoryError>;
    /// 删除参数
    async fn delete_argument(&self, id: i32) -> Result<(), RepositoryError>;
}
