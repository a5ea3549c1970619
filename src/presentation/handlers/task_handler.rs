// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::home_response::HomeDto;
use crate::config::settings::PlatformSettings;
use crate::domain::models::task::Task;
use crate::domain::services::task_tracker::TaskTracker;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::user_id::UserId;
use axum::extract::{Extension, Path};
use axum::Json;
use std::sync::Arc;

/// 当前用户的任务，按提交顺序
pub async fn list_tasks(
    Extension(tracker): Extension<TaskTracker>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(tracker.list_for_user(user_id).await?))
}

/// 从队列刷新任务状态
pub async fn refresh_task(
    Extension(tracker): Extension<TaskTracker>,
    UserId(user_id): UserId,
    Path(id): Path<i32>,
) -> Result<Json<Task>, AppError> {
    Ok(Json(tracker.refresh(user_id, id).await?))
}

/// 首页：平台版本和用户任务
pub async fn home(
    Extension(tracker): Extension<TaskTracker>,
    Extension(platform): Extension<Arc<PlatformSettings>>,
    UserId(user_id): UserId,
) -> Result<Json<HomeDto>, AppError> {
    let user_tasks = tracker.list_for_user(user_id).await?;
    Ok(Json(HomeDto {
        platform_version: platform.version.clone(),
        user_tasks,
    }))
}
