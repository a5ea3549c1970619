// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::extraction::{JobHandle, JobState};

/// 任务跟踪记录
///
/// 记录某个用户发起的异步提取任务及其最后已知状态。
/// 状态不会自动更新，需要通过 `TaskTracker::refresh` 向队列查询。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    /// 工作器分配的任务ID
    pub task_id: String,
    pub state: JobState,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// 待记录的任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub user_id: i32,
    pub name: String,
    pub task_id: String,
    pub state: JobState,
}

impl NewTask {
    pub fn new(user_id: i32, name: impl Into<String>, handle: &JobHandle) -> Self {
        Self {
            user_id,
            name: name.into(),
            task_id: handle.task_id.clone(),
            state: handle.state,
        }
    }
}
