// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    application::{
        dto::server_request::{
            ParameterRequestDto, ServerProfileRequestDto, TemplateServerRequestDto,
        },
        use_cases::server_use_case::ServerUseCase,
    },
    domain::repositories::server_repository::ServerRepository,
    presentation::errors::AppError,
};

pub async fn list_parameters<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    Ok(Json(ServerUseCase::new(server_repo).list_parameters().await?))
}

pub async fn create_parameter<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
    Json(payload): Json<ParameterRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    let parameter = ServerUseCase::new(server_repo)
        .create_parameter(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(parameter)))
}

pub async fn get_parameter<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    Ok(Json(ServerUseCase::new(server_repo).get_parameter(id).await?))
}

pub async fn delete_parameter<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    ServerUseCase::new(server_repo).delete_parameter(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_templates<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    Ok(Json(ServerUseCase::new(server_repo).list_templates().await?))
}

/// 创建服务器模板，`params` 为参数ID数组的JSON字符串
pub async fn create_template<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
    Json(payload): Json<TemplateServerRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    let template = ServerUseCase::new(server_repo)
        .create_template(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(template)))
}

pub async fn get_template<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    Ok(Json(ServerUseCase::new(server_repo).get_template(id).await?))
}

pub async fn delete_template<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    ServerUseCase::new(server_repo).delete_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_profiles<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    Ok(Json(ServerUseCase::new(server_repo).list_profiles().await?))
}

pub async fn create_profile<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
    Json(payload): Json<ServerProfileRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    let profile = ServerUseCase::new(server_repo)
        .create_profile(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_profile<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    Ok(Json(ServerUseCase::new(server_repo).get_profile(id).await?))
}

pub async fn delete_profile<SVR>(
    Extension(server_repo): Extension<Arc<SVR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    SVR: ServerRepository + 'static,
{
    ServerUseCase::new(server_repo).delete_profile(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
