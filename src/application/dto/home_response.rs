// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::Task;
use serde::Serialize;

/// 首页：平台版本和当前用户的任务
#[derive(Debug, Clone, Serialize)]
pub struct HomeDto {
    pub platform_version: String,
    pub user_tasks: Vec<Task>,
}
