// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::task_repository::RepositoryError;
use sea_orm::DeleteResult;

/// 仓库实现模块
///
/// 提供领域仓库接口的SeaORM实现
pub mod command_repo_impl;
pub mod server_repo_impl;
pub mod source_repo_impl;
pub mod task_repo_impl;
pub mod testing_repo_impl;

/// 按主键删除未命中任何行时视为记录不存在
pub(crate) fn ensure_deleted(result: DeleteResult) -> Result<(), RepositoryError> {
    if result.rows_affected == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
