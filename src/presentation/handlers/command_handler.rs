// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    application::{
        dto::command_request::{ArgumentQuery, ArgumentRequestDto, CommandRequestDto},
        use_cases::command_use_case::CommandUseCase,
    },
    domain::repositories::{
        command_repository::CommandRepository, source_repository::SourceRepository,
    },
    presentation::errors::AppError,
};

/// 命令列表，附带参数和数据源
pub async fn list_commands<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    let commands = CommandUseCase::new(command_repo, source_repo).list().await?;
    Ok(Json(commands))
}

pub async fn list_basic_commands<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    let commands = CommandUseCase::new(command_repo, source_repo)
        .list_basic()
        .await?;
    Ok(Json(commands))
}

pub async fn create_command<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
    Json(payload): Json<CommandRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    let command = CommandUseCase::new(command_repo, source_repo)
        .create(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(command)))
}

pub async fn get_command<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    let command = CommandUseCase::new(command_repo, source_repo).get(id).await?;
    Ok(Json(command))
}

pub async fn update_command<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
    Path(id): Path<i32>,
    Json(payload): Json<CommandRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    let command = CommandUseCase::new(command_repo, source_repo)
        .update(id, payload)
        .await?;
    Ok(Json(command))
}

pub async fn delete_command<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    CommandUseCase::new(command_repo, source_repo)
        .delete(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 参数列表，可用 `?command=` 过滤
pub async fn list_arguments<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
    Query(query): Query<ArgumentQuery>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    let arguments = CommandUseCase::new(command_repo, source_repo)
        .list_arguments(query.command)
        .await?;
    Ok(Json(arguments))
}

pub async fn create_argument<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
    Json(payload): Json<ArgumentRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    let argument = CommandUseCase::new(command_repo, source_repo)
        .create_argument(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(argument)))
}

pub async fn get_argument<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    let argument = CommandUseCase::new(command_repo, source_repo)
        .get_argument(id)
        .await?;
    Ok(Json(argument))
}

pub async fn update_argument<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
    Path(id): Path<i32>,
    Json(payload): Json<ArgumentRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    let argument = CommandUseCase::new(command_repo, source_repo)
        .update_argument(id, payload)
        .await?;
    Ok(Json(argument))
}

pub async fn delete_argument<CR, SR>(
    Extension(command_repo): Extension<Arc<CR>>,
    Extension(source_repo): Extension<Arc<SR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    CommandUseCase::new(command_repo, source_repo)
        .delete_argument(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
