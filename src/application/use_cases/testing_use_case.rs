// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::{
    application::dto::testing_request::{CollectionRequestDto, KeywordRequestDto},
    domain::{
        models::testing::{Collection, Keyword, NewCollection, NewKeyword},
        repositories::{task_repository::RepositoryError, testing_repository::TestingRepository},
    },
};
use axum::http::StatusCode;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

#[derive(Error, Debug)]
pub enum TestingUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<TestingUseCaseError> for (StatusCode, String) {
    fn from(err: TestingUseCaseError) -> Self {
        let status = match &err {
            TestingUseCaseError::ValidationError(_) => StatusCode::BAD_REQUEST,
            TestingUseCaseError::NotFound(_)
            | TestingUseCaseError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            TestingUseCaseError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, err.to_string())
    }
}

/// 关键字和集合的管理
pub struct TestingUseCase<TR> {
    testing_repo: Arc<TR>,
}

impl<TR> TestingUseCase<TR>
where
    TR: TestingRepository + 'static,
{
    pub fn new(testing_repo: Arc<TR>) -> Self {
        Self { testing_repo }
    }

    /// 创建关键字，所属用户为请求用户
    pub async fn create_keyword(
        &self,
        user_id: i32,
        dto: KeywordRequestDto,
    ) -> Result<Keyword, TestingUseCaseError> {
        dto.validate()
            .map_err(|e| TestingUseCaseError::ValidationError(e.to_string()))?;
        Ok(self
            .testing_repo
            .create_keyword(&NewKeyword {
                user_id,
                name: dto.name,
                description: dto.description,
                script: dto.script,
            })
            .await?)
    }

    pub async fn get_keyword(&self, id: i32) -> Result<Keyword, TestingUseCaseError> {
        self.testing_repo
            .find_keyword(id)
            .await?
            .ok_or(TestingUseCaseError::NotFound("Keyword"))
    }

    pub async fn list_keywords(&self) -> Result<Vec<Keyword>, TestingUseCaseError> {
        Ok(self.testing_repo.list_keywords().await?)
    }

    pub async fn delete_keyword(&self, id: i32) -> Result<(), TestingUseCaseError> {
        self.testing_repo
            .delete_keyword(id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => TestingUseCaseError::NotFound("Keyword"),
                other => other.into(),
            })
    }

    pub async fn create_collection(
        &self,
        dto: CollectionRequestDto,
    ) -> Result<Collection, TestingUseCaseError> {
        dto.validate()
            .map_err(|e| TestingUseCaseError::ValidationError(e.to_string()))?;

        let wanted: BTreeSet<i32> = dto.keywords.iter().copied().collect();
        let found: BTreeSet<i32> = self
            .testing_repo
            .find_keywords(&dto.keywords)
            .await?
            .into_iter()
            .map(|k| k.id)
            .collect();
        if let Some(missing) = wanted.difference(&found).next() {
            return Err(TestingUseCaseError::ValidationError(format!(
                "keywords: {} does not exist",
                missing
            )));
        }

        Ok(self
            .testing_repo
            .create_collection(&NewCollection {
                name: dto.name,
                description: dto.description,
                keywords: wanted.into_iter().collect(),
            })
            .await?)
    }

    pub async fn get_collection(&self, id: i32) -> Result<Collection, TestingUseCaseError> {
        self.testing_repo
            .find_collection(id)
            .await?
            .ok_or(TestingUseCaseError::NotFound("Collection"))
    }

    pub async fn list_collections(&self) -> Result<Vec<Collection>, TestingUseCaseError> {
        Ok(self.testing_repo.list_collections().await?)
    }

    pub async fn delete_collection(&self, id: i32) -> Result<(), TestingUseCaseError> {
        self.testing_repo
            .delete_collection(id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => TestingUseCaseError::NotFound("Collection"),
                other => other.into(),
            })
    }
}
