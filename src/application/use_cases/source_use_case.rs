// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{
    application::dto::source_request::{
        CreateSourceDto, LibrarySourceForm, ProductSourceForm, RobotSourceEditForm,
        SourceListDto,
    },
    domain::{
        models::{
            command::SourceDeletion,
            extraction::JobHandle,
            source::{NewSource, Source, SourceCategory, SourceKind},
            task::Task,
        },
        repositories::{
            source_repository::SourceRepository, storage_repository::StorageError,
            task_repository::RepositoryError,
        },
        services::{
            archive_service::ArchiveService,
            extraction_dispatcher::{DispatchError, ExtractionDispatcher},
        },
    },
    infrastructure::metrics::SOURCES_DELETED,
};
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

#[derive(Error, Debug)]
pub enum SourceUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Source not found")]
    NotFound,
    #[error("Unknown source category: {0}")]
    UnknownCategory(String),
    /// 数据源已保存，但提取任务未能提交
    #[error("Error {error}")]
    DispatchFailed {
        created: Box<Source>,
        error: DispatchError,
    },
}

impl From<SourceUseCaseError> for (StatusCode, String) {
    fn from(err: SourceUseCaseError) -> Self {
        let status = match &err {
            SourceUseCaseError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SourceUseCaseError::NotFound | SourceUseCaseError::UnknownCategory(_) => {
                StatusCode::NOT_FOUND
            }
            SourceUseCaseError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            SourceUseCaseError::DispatchFailed { .. } => StatusCode::BAD_GATEWAY,
            SourceUseCaseError::Repository(_) | SourceUseCaseError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, err.to_string())
    }
}

/// 创建数据源并提交提取任务的结果
#[derive(Debug, Clone)]
pub struct SourceCreated {
    pub message: String,
    pub source: Source,
    pub handle: JobHandle,
    /// 跟踪记录延迟写入时为 `None`
    pub task: Option<Task>,
}

pub struct SourceUseCase<SR> {
    source_repo: Arc<SR>,
    dispatcher: ExtractionDispatcher,
    archives: ArchiveService,
}

impl<SR> SourceUseCase<SR>
where
    SR: SourceRepository + 'static,
{
    pub fn new(source_repo: Arc<SR>, dispatcher: ExtractionDispatcher, archives: ArchiveService) -> Self {
        Self {
            source_repo,
            dispatcher,
            archives,
        }
    }

    pub fn category_from_slug(slug: &str) -> Result<SourceCategory, SourceUseCaseError> {
        SourceCategory::from_slug(slug)
            .ok_or_else(|| SourceUseCaseError::UnknownCategory(slug.to_string()))
    }

    /// 创建数据源并为发起用户提交提取任务
    ///
    /// 压缩包在数据源保存前写入存储，数据源保存失败时删除该压缩包。
    /// 提交失败时数据源保留，不创建任务记录。
    pub async fn create(
        &self,
        user_id: i32,
        dto: CreateSourceDto,
    ) -> Result<SourceCreated, SourceUseCaseError> {
        let mut archive_url = None;
        let new_source = match dto {
            CreateSourceDto::Products(form) => {
                validate(&form)?;
                NewSource::products(form.name.clone(), form.description.clone(), form.settings())
            }
            CreateSourceDto::RobotFramework {
                description,
                archive,
            } => {
                let archive = archive.ok_or_else(|| {
                    SourceUseCaseError::ValidationError(
                        "zip_file: an archive is required for Robot Framework sources".to_string(),
                    )
                })?;
                let url = self
                    .archives
                    .save_archive(&archive.file_name, &archive.data)
                    .await?;
                archive_url = Some(url.clone());
                NewSource::robot_framework(description, Some(url))
            }
            CreateSourceDto::Libraries(form) => {
                validate(&form)?;
                NewSource::libraries(form.name, form.description, form.url)
            }
        };

        let source = match self.source_repo.create(&new_source).await {
            Ok(source) => source,
            Err(e) => {
                if let Some(url) = archive_url {
                    if let Err(discard) = self.archives.discard_archive(&url).await {
                        warn!("Failed to remove orphaned archive {}: {}", url, discard);
                    }
                }
                return Err(e.into());
            }
        };
        info!("Created {} source {} ({})", source.category(), source.id, source.name);

        let outcome = self
            .dispatcher
            .dispatch(user_id, &source)
            .await
            .map_err(|error| SourceUseCaseError::DispatchFailed {
                created: Box::new(source.clone()),
                error,
            })?;

        Ok(SourceCreated {
            message: created_message(&source),
            source,
            handle: outcome.handle,
            task: outcome.task,
        })
    }

    /// 更新数据源
    ///
    /// 表单由已保存的类别决定，类别本身不可修改。
    pub async fn update(&self, id: i32, body: Value) -> Result<Source, SourceUseCaseError> {
        let mut source = self.get(id).await?;

        source.kind = match &source.kind {
            SourceKind::Products(stored) => {
                let form: ProductSourceForm = parse_form(body)?;
                source.name = form.name.clone();
                source.description = form.description.clone();
                let mut settings = form.settings();
                // 响应不返回密码，未提交时保留原值
                if settings.password.is_none() {
                    settings.password = stored.password.clone();
                }
                SourceKind::Products(settings)
            }
            SourceKind::RobotFramework { archive } => {
                let form: RobotSourceEditForm = parse_form(body)?;
                source.name = NewSource::ROBOT_FRAMEWORK_NAME.to_string();
                source.description = form.description;
                SourceKind::RobotFramework {
                    archive: archive.clone(),
                }
            }
            SourceKind::Libraries { .. } => {
                let form: LibrarySourceForm = parse_form(body)?;
                source.name = form.name;
                source.description = form.description;
                SourceKind::Libraries { url: form.url }
            }
        };

        Ok(self.source_repo.update(&source).await?)
    }

    /// 删除数据源，只被它引用的命令一并删除
    pub async fn delete(&self, id: i32) -> Result<SourceDeletion, SourceUseCaseError> {
        let deletion = self.source_repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => SourceUseCaseError::NotFound,
            other => other.into(),
        })?;
        metrics::counter!(SOURCES_DELETED).increment(1);
        info!(
            "Deleted source {} and {} commands",
            id,
            deletion.removed_commands.len()
        );
        Ok(deletion)
    }

    pub async fn get(&self, id: i32) -> Result<Source, SourceUseCaseError> {
        self.source_repo
            .find_by_id(id)
            .await?
            .ok_or(SourceUseCaseError::NotFound)
    }

    pub async fn list(
        &self,
        category: Option<SourceCategory>,
    ) -> Result<Vec<Source>, SourceUseCaseError> {
        Ok(self.source_repo.list(category).await?)
    }

    pub async fn list_by_slug(&self, slug: &str) -> Result<SourceListDto, SourceUseCaseError> {
        let category = Self::category_from_slug(slug)?;
        let sources = self.source_repo.list(Some(category)).await?;
        Ok(SourceListDto::new(category, &sources))
    }
}

pub const SOURCE_DELETED_MESSAGE: &str = "Robot Framework Source and his commands deleted";

fn created_message(source: &Source) -> String {
    match source.category() {
        SourceCategory::Products => {
            format!("Product {} created and running the extract", source.name)
        }
        SourceCategory::RobotFramework => {
            "Robot Framework Source created and running the extract".to_string()
        }
        SourceCategory::Libraries => {
            format!("Library {} created and running the extract", source.name)
        }
    }
}

fn validate<T: Validate>(form: &T) -> Result<(), SourceUseCaseError> {
    form.validate()
        .map_err(|e| SourceUseCaseError::ValidationError(e.to_string()))
}

fn parse_form<T: DeserializeOwned + Validate>(body: Value) -> Result<T, SourceUseCaseError> {
    let form: T = serde_json::from_value(body)
        .map_err(|e| SourceUseCaseError::ValidationError(e.to_string()))?;
    validate(&form)?;
    Ok(form)
}

#[cfg(test)]
#[path = "source_use_case_test.rs"]
mod tests;
