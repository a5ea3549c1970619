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
        dto::testing_request::{CollectionRequestDto, KeywordRequestDto},
        use_cases::testing_use_case::TestingUseCase,
    },
    domain::repositories::testing_repository::TestingRepository,
    presentation::{errors::AppError, extractors::user_id::UserId},
};

pub async fn list_keywords<TR>(
    Extension(testing_repo): Extension<Arc<TR>>,
) -> Result<impl IntoResponse, AppError>
where
    TR: TestingRepository + 'static,
{
    Ok(Json(TestingUseCase::new(testing_repo).list_keywords().await?))
}

/// 创建关键字，所属用户取自 `X-User-Id`
pub async fn create_keyword<TR>(
    Extension(testing_repo): Extension<Arc<TR>>,
    UserId(user_id): UserId,
    Json(payload): Json<KeywordRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    TR: TestingRepository + 'static,
{
    let keyword = TestingUseCase::new(testing_repo)
        .create_keyword(user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(keyword)))
}

pub async fn get_keyword<TR>(
    Extension(testing_repo): Extension<Arc<TR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    TR: TestingRepository + 'static,
{
    Ok(Json(TestingUseCase::new(testing_repo).get_keyword(id).await?))
}

pub async fn delete_keyword<TR>(
    Extension(testing_repo): Extension<Arc<TR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    TR: TestingRepository + 'static,
{
    TestingUseCase::new(testing_repo).delete_keyword(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_collections<TR>(
    Extension(testing_repo): Extension<Arc<TR>>,
) -> Result<impl IntoResponse, AppError>
where
    TR: TestingRepository + 'static,
{
    Ok(Json(
        TestingUseCase::new(testing_repo).list_collections().await?,
    ))
}

pub async fn create_collection<TR>(
    Extension(testing_repo): Extension<Arc<TR>>,
    Json(payload): Json<CollectionRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    TR: TestingRepository + 'static,
{
    let collection = TestingUseCase::new(testing_repo)
        .create_collection(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

pub async fn get_collection<TR>(
    Extension(testing_repo): Extension<Arc<TR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    TR: TestingRepository + 'static,
{
    Ok(Json(
        TestingUseCase::new(testing_repo).get_collection(id).await?,
    ))
}

pub async fn delete_collection<TR>(
    Extension(testing_repo): Extension<Arc<TR>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError>
where
    TR: TestingRepository + 'static,
{
    TestingUseCase::new(testing_repo).delete_collection(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
