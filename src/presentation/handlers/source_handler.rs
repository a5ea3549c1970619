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

use axum::{
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    application::{
        dto::source_request::{CreateSourceDto, SourceDto, SourceFormData, UploadedFile},
        use_cases::source_use_case::{SourceUseCase, SOURCE_DELETED_MESSAGE},
    },
    domain::{
        repositories::source_repository::SourceRepository,
        services::{archive_service::ArchiveService, extraction_dispatcher::ExtractionDispatcher},
    },
    presentation::{errors::AppError, extractors::user_id::UserId},
};

/// 压缩包所在的表单字段
const ARCHIVE_FIELD: &str = "zip_file";

#[derive(Debug, Default, Deserialize)]
pub struct SourceQuery {
    /// 类别短名称
    pub category: Option<String>,
}

fn use_case<SR>(
    source_repo: Arc<SR>,
    dispatcher: ExtractionDispatcher,
    archives: ArchiveService,
) -> SourceUseCase<SR>
where
    SR: SourceRepository + 'static,
{
    SourceUseCase::new(source_repo, dispatcher, archives)
}

/// 读取多部分表单，`zip_file` 作为文件，其余作为文本字段
async fn read_form(mut multipart: Multipart) -> Result<SourceFormData, AppError> {
    let mut form = SourceFormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::new(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == ARCHIVE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::new(e.status(), e.body_text()))?;
            if !data.is_empty() {
                form.zip_file = Some(UploadedFile { file_name, data });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::new(e.status(), e.body_text()))?;
            form.insert_field(name, value);
        }
    }

    Ok(form)
}

/// 按类别列出数据源
pub async fn list_by_slug<SR>(
    Extension(source_repo): Extension<Arc<SR>>,
    Extension(dispatcher): Extension<ExtractionDispatcher>,
    Extension(archives): Extension<ArchiveService>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    SR: SourceRepository + 'static,
{
    let listing = use_case(source_repo, dispatcher, archives)
        .list_by_slug(&slug)
        .await?;
    Ok(Json(listing))
}

/// 创建数据源并提交提取任务
pub async fn create_source<SR>(
    Extension(source_repo): Extension<Arc<SR>>,
    Extension(dispatcher): Extension<ExtractionDispatcher>,
    Extension(archives): Extension<ArchiveService>,
    UserId(user_id): UserId,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError>
where
    SR: SourceRepository + 'static,
{
    let category = SourceUseCase::<SR>::category_from_slug(&slug)?;
    let form = read_form(multipart).await?;
    let dto = CreateSourceDto::from_form(category, form).map_err(AppError::bad_request)?;

    let created = use_case(source_repo, dispatcher, archives)
        .create(user_id, dto)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": created.message,
            "source": SourceDto::from(&created.source),
            "task_id": created.handle.task_id,
            "state": created.handle.state,
            "task": created.task,
        })),
    ))
}

/// 列出数据源，可用 `?category=` 过滤
pub async fn list_sources<SR>(
    Extension(source_repo): Extension<Arc<SR>>,
    Extension(dispatcher): Extension<ExtractionDispatcher>,
    Extension(archives): Extension<ArchiveService>,
    Query(query): Query<SourceQuery>,
) -> Result<impl IntoResponse, AppError>
where
    SR: SourceRepository + 'static,
{
    let category = query
        .category
        .as_deref()
        .map(SourceUseCase::<SR>::category_from_slug)
        .transpose()?;
    let sources = use_case(source_repo, dispatcher, archives)
        .list(category)
        .await?;
    Ok(Json(sources.iter().map(SourceDto::from).collect::<Vec<_>>()))
}

pub async fn get_source<SR>(
    Extension(source_repo): Extension<Arc<SR>>,
    Extension(dispatcher): Extension<ExtractionDispatcher>,
    Extension(archives): Extension<ArchiveService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    SR: SourceRepository + 'static,
{
    let source = use_case(source_repo, dispatcher, archives).get(id).await?;
    Ok(Json(SourceDto::from(&source)))
}

/// 编辑数据源，请求体字段由已保存的类别决定
pub async fn update_source<SR>(
    Extension(source_repo): Extension<Arc<SR>>,
    Extension(dispatcher): Extension<ExtractionDispatcher>,
    Extension(archives): Extension<ArchiveService>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError>
where
    SR: SourceRepository + 'static,
{
    let source = use_case(source_repo, dispatcher, archives)
        .update(id, body)
        .await?;
    Ok(Json(json!({
        "message": format!("Source {} updated", source.name),
        "source": SourceDto::from(&source),
    })))
}

pub async fn delete_source<SR>(
    Extension(source_repo): Extension<Arc<SR>>,
    Extension(dispatcher): Extension<ExtractionDispatcher>,
    Extension(archives): Extension<ArchiveService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    SR: SourceRepository + 'static,
{
    let deletion = use_case(source_repo, dispatcher, archives)
        .delete(id)
        .await?;
    Ok(Json(json!({
        "message": SOURCE_DELETED_MESSAGE,
        "source_id": deletion.source_id,
        "removed_commands": deletion.removed_commands,
        "retained_commands": deletion.retained_commands,
    })))
}
