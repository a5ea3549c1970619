// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 测试关键字，归属于创建它的用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub script: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewKeyword {
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub script: serde_json::Value,
}

/// 关键字集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub keywords: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollection {
    pub name: String,
    pub description: Option<String>,
    pub keywords: Vec<i32>,
}
