// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// 关键字创建请求，所属用户取自请求身份
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct KeywordRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub script: Value,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CollectionRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<i32>,
}
