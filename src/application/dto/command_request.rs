// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::source_request::SourceDto;
use crate::domain::models::command::{Argument, Command};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CommandRequestDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    /// 引用该命令的数据源ID
    #[serde(default, rename = "source")]
    pub source_ids: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ArgumentRequestDto {
    #[serde(rename = "command")]
    pub command_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub needs_value: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArgumentQuery {
    pub command: Option<i32>,
}

/// 带参数和数据源的命令
#[derive(Debug, Clone, Serialize)]
pub struct CommandDetailDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<Argument>,
    pub source: Vec<SourceDto>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl CommandDetailDto {
    pub fn new(command: Command, arguments: Vec<Argument>, source: Vec<SourceDto>) -> Self {
        Self {
            id: command.id,
            name: command.name,
            description: command.description,
            arguments,
            source,
            created_at: command.created_at,
            updated_at: command.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BasicCommandDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<Command> for BasicCommandDto {
    fn from(command: Command) -> Self {
        Self {
            id: command.id,
            name: command.name,
            description: command.description,
        }
    }
}
