// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ParameterRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub category: i32,
    pub description: Option<String>,
}

/// 服务器模板创建请求
///
/// `params` 是参数ID数组的JSON字符串，例如 `"[1,2,3]"`。
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TemplateServerRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub category: i32,
    #[serde(default)]
    pub params: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerProfileRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "template")]
    pub template_id: i32,
    #[serde(default)]
    pub config: Value,
}
