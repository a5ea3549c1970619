// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::application::{
    dto::source_request::SourceDto,
    use_cases::{
        command_use_case::CommandUseCaseError, server_use_case::ServerUseCaseError,
        source_use_case::SourceUseCaseError, testing_use_case::TestingUseCaseError,
    },
};
use crate::domain::services::task_tracker::TaskTrackerError;

/// 应用错误类型
///
/// 各用例错误统一转换为HTTP状态码和 `{"error": ...}` 响应体
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    body: Value,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn from_parts((status, message): (StatusCode, String)) -> Self {
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, message);
        }
        Self::new(status, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<SourceUseCaseError> for AppError {
    fn from(err: SourceUseCaseError) -> Self {
        // 提交失败时数据源已保存，响应中一并返回
        let created = match &err {
            SourceUseCaseError::DispatchFailed { created, .. } => {
                Some(SourceDto::from(created.as_ref()))
            }
            _ => None,
        };

        let mut app_error = Self::from_parts(err.into());
        if let (Some(source), Some(body)) = (created, app_error.body.as_object_mut()) {
            body.insert("source".to_string(), json!(source));
        }
        app_error
    }
}

impl From<CommandUseCaseError> for AppError {
    fn from(err: CommandUseCaseError) -> Self {
        Self::from_parts(err.into())
    }
}

impl From<ServerUseCaseError> for AppError {
    fn from(err: ServerUseCaseError) -> Self {
        Self::from_parts(err.into())
    }
}

impl From<TestingUseCaseError> for AppError {
    fn from(err: TestingUseCaseError) -> Self {
        Self::from_parts(err.into())
    }
}

impl From<TaskTrackerError> for AppError {
    fn from(err: TaskTrackerError) -> Self {
        let status = match &err {
            TaskTrackerError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskTrackerError::Queue(_) => StatusCode::BAD_GATEWAY,
            TaskTrackerError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::from_parts((status, err.to_string()))
    }
}
