// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::testing::{Collection, Keyword, NewCollection, NewKeyword};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;

/// 测试目录仓库特质
#[async_trait]
pub trait TestingRepository: Send + Sync {
    async fn create_keyword(&self, keyword: &NewKeyword) -> Result<Keyword, RepositoryError>;
    async fn find_keyword(&self, id: i32) -> Result<Option<Keyword>, RepositoryError>;
    async fn find_keywords(&self, ids: &[i32]) -> Result<Vec<Keyword>, RepositoryError>;
    async fn list_keywords(&self) -> Result<Vec<Keyword>, RepositoryError>;
    async fn delete_keyword(&self, id: i32) -> Result<(), RepositoryError>;

    async fn create_collection(
        &self,
        collection: &NewCollection,
    ) -> Result<Collection, RepositoryError>;
    async fn find_collection(&self, id: i32) -> Result<Option<Collection>, RepositoryError>;
    async fn list_collections(&self) -> Result<Vec<Collection>, RepositoryError>;
    async fn delete_collection(&self, id: i32) -> Result<(), RepositoryError>;
}
