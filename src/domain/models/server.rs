// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 服务器参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: i32,
    pub name: String,
    pub category: i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParameter {
    pub name: String,
    pub category: i32,
    pub description: Option<String>,
}

/// 服务器模板，聚合一组参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateServer {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: i32,
    pub parameters: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemplateServer {
    pub name: String,
    pub description: Option<String>,
    pub category: i32,
    pub parameters: Vec<i32>,
}

/// 服务器配置档，为模板参数赋值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerProfile {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub template_id: i32,
    pub config: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewServerProfile {
    pub name: String,
    pub description: Option<String>,
    pub template_id: i32,
    pub config: serde_json::Value,
}
