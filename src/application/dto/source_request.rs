// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::source::{ProductSettings, Source, SourceCategory, SourceKind};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationError};

fn validate_regex(value: &str) -> Result<(), ValidationError> {
    regex::Regex::new(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_regex"))
}

/// 产品数据源表单，创建和编辑共用
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProductSourceForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1), custom(function = "validate_regex"))]
    pub regex: String,
    #[validate(length(min = 1, max = 255))]
    pub path: String,
    #[validate(length(min = 1, max = 255))]
    pub host: String,
    #[validate(range(min = 1, max = 65535))]
    pub port: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProductSourceForm {
    pub fn settings(&self) -> ProductSettings {
        ProductSettings {
            regex: self.regex.clone(),
            path: self.path.clone(),
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// 库数据源表单，创建和编辑共用
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LibrarySourceForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[validate(url)]
    pub url: String,
}

/// Robot Framework 数据源编辑表单
///
/// 名称固定，压缩包只在创建时上传。
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RobotSourceEditForm {
    pub description: Option<String>,
}

/// 上传的文件
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

/// 多部分表单的原始内容
#[derive(Debug, Clone, Default)]
pub struct SourceFormData {
    fields: HashMap<String, String>,
    pub zip_file: Option<UploadedFile>,
}

impl SourceFormData {
    pub fn insert_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// 去除首尾空白，空字符串视为未填写
    fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn required(&self, name: &str) -> String {
        self.text(name).unwrap_or_default()
    }
}

/// 按类别解析后的创建请求
#[derive(Debug, Clone)]
pub enum CreateSourceDto {
    Products(ProductSourceForm),
    RobotFramework {
        description: Option<String>,
        archive: Option<UploadedFile>,
    },
    Libraries(LibrarySourceForm),
}

impl CreateSourceDto {
    /// 根据路由类别挑选表单
    pub fn from_form(category: SourceCategory, form: SourceFormData) -> Result<Self, String> {
        match category {
            SourceCategory::Products => {
                let port = match form.text("port") {
                    Some(raw) => Some(
                        raw.parse::<i32>()
                            .map_err(|_| format!("port: '{}' is not an integer", raw))?,
                    ),
                    None => None,
                };
                Ok(CreateSourceDto::Products(ProductSourceForm {
                    name: form.required("name"),
                    description: form.text("description"),
                    regex: form.required("regex"),
                    path: form.required("path"),
                    host: form.required("host"),
                    port,
                    username: form.text("username"),
                    password: form.text("password"),
                }))
            }
            SourceCategory::RobotFramework => Ok(CreateSourceDto::RobotFramework {
                description: form.text("description"),
                archive: form.zip_file,
            }),
            SourceCategory::Libraries => Ok(CreateSourceDto::Libraries(LibrarySourceForm {
                name: form.required("name"),
                description: form.text("description"),
                url: form.required("url"),
            })),
        }
    }

    pub fn category(&self) -> SourceCategory {
        match self {
            CreateSourceDto::Products(_) => SourceCategory::Products,
            CreateSourceDto::RobotFramework { .. } => SourceCategory::RobotFramework,
            CreateSourceDto::Libraries(_) => SourceCategory::Libraries,
        }
    }
}

/// 数据源响应，不包含密码
#[derive(Debug, Clone, Serialize)]
pub struct SourceDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: SourceCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<&Source> for SourceDto {
    fn from(source: &Source) -> Self {
        let mut dto = SourceDto {
            id: source.id,
            name: source.name.clone(),
            description: source.description.clone(),
            category: source.category(),
            regex: None,
            path: None,
            host: None,
            port: None,
            username: None,
            zip_file: None,
            url: None,
            created_at: source.created_at,
            updated_at: source.updated_at,
        };

        match &source.kind {
            SourceKind::Products(settings) => {
                dto.regex = Some(settings.regex.clone());
                dto.path = Some(settings.path.clone());
                dto.host = Some(settings.host.clone());
                dto.port = settings.port;
                dto.username = settings.username.clone();
            }
            SourceKind::RobotFramework { archive } => dto.zip_file = archive.clone(),
            SourceKind::Libraries { url } => dto.url = Some(url.clone()),
        }

        dto
    }
}

/// 按类别列出的数据源
#[derive(Debug, Clone, Serialize)]
pub struct SourceListDto {
    pub title: &'static str,
    pub category: SourceCategory,
    pub slug: &'static str,
    pub sources: Vec<SourceDto>,
}

impl SourceListDto {
    pub fn new(category: SourceCategory, sources: &[Source]) -> Self {
        Self {
            title: category.title(),
            category,
            slug: category.slug(),
            sources: sources.iter().map(SourceDto::from).collect(),
        }
    }
}
