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

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::presentation::errors::AppError;

pub const HEADER_NAME: &str = "X-User-Id";

/// 请求用户身份
///
/// 取自 `X-User-Id` 请求头，只标识发起者，不做认证。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(HEADER_NAME)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i32>().ok())
            .filter(|id| *id > 0)
            .map(UserId)
            .ok_or_else(|| AppError::bad_request("Missing or invalid X-User-Id header"))
    }
}
