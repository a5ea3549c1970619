// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 数据源类别
///
/// 类别决定数据源需要哪些配置字段，以及提取任务收到的配置结构。
/// 数值编码与持久化层和提取工作器共享，不可更改。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum SourceCategory {
    /// 产品目录，通过主机连接和正则表达式抓取命令
    Products,
    /// Robot Framework 测试套件，以压缩包形式上传
    RobotFramework,
    /// Robot Framework 库，通过 URL 获取
    Libraries,
}

impl SourceCategory {
    pub const ALL: [SourceCategory; 3] = [
        SourceCategory::Products,
        SourceCategory::RobotFramework,
        SourceCategory::Libraries,
    ];

    /// 持久化与工作器使用的数值编码
    pub fn code(self) -> i32 {
        match self {
            SourceCategory::Products => 3,
            SourceCategory::RobotFramework => 4,
            SourceCategory::Libraries => 5,
        }
    }

    /// 路由中使用的短名称
    pub fn slug(self) -> &'static str {
        match self {
            SourceCategory::Products => "products",
            SourceCategory::RobotFramework => "robot",
            SourceCategory::Libraries => "libraries",
        }
    }

    /// 列表页标题
    pub fn title(self) -> &'static str {
        match self {
            SourceCategory::Products => "Products",
            SourceCategory::RobotFramework => "Robot Framework",
            SourceCategory::Libraries => "Robot Framework Libraries",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for SourceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| DomainError::UnknownCategory(s.to_string()))
    }
}

impl From<SourceCategory> for i32 {
    fn from(category: SourceCategory) -> Self {
        category.code()
    }
}

impl TryFrom<i32> for SourceCategory {
    type Error = DomainError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| DomainError::UnknownCategory(code.to_string()))
    }
}

/// 产品数据源的连接配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSettings {
    pub regex: String,
    pub path: String,
    pub host: String,
    pub port: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// 数据源的类别相关配置
///
/// 每个变体只携带其类别需要的字段，类别由变体本身决定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceKind {
    Products(ProductSettings),
    RobotFramework {
        /// 已保存压缩包的公开 URL
        archive: Option<String>,
    },
    Libraries {
        url: String,
    },
}

impl SourceKind {
    pub fn category(&self) -> SourceCategory {
        match self {
            SourceKind::Products(_) => SourceCategory::Products,
            SourceKind::RobotFramework { .. } => SourceCategory::RobotFramework,
            SourceKind::Libraries { .. } => SourceCategory::Libraries,
        }
    }
}

/// 数据源实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub kind: SourceKind,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl Source {
    pub fn category(&self) -> SourceCategory {
        self.kind.category()
    }
}

/// 待创建的数据源
#[derive(Debug, Clone, PartialEq)]
pub struct NewSource {
    pub name: String,
    pub description: Option<String>,
    pub kind: SourceKind,
}

impl NewSource {
    /// Robot Framework 数据源的名称固定
    pub const ROBOT_FRAMEWORK_NAME: &'static str = "Robot Framework";

    pub fn products(name: String, description: Option<String>, settings: ProductSettings) -> Self {
        Self {
            name,
            description,
            kind: SourceKind::Products(settings),
        }
    }

    pub fn robot_framework(description: Option<String>, archive: Option<String>) -> Self {
        Self {
            name: Self::ROBOT_FRAMEWORK_NAME.to_string(),
            description,
            kind: SourceKind::RobotFramework { archive },
        }
    }

    pub fn libraries(name: String, description: Option<String>, url: String) -> Self {
        Self {
            name,
            description,
            kind: SourceKind::Libraries { url },
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    /// 未知的数据源类别（短名称或数值编码）
    #[error("Unknown source category: {0}")]
    UnknownCategory(String),

    /// 验证错误，当输入数据不符合领域规则时发生
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 请求字段与数据源类别不匹配
    #[error("Category mismatch: expected {expected}, got {actual}")]
    CategoryMismatch {
        expected: SourceCategory,
        actual: SourceCategory,
    },

    /// Robot Framework 数据源缺少压缩包
    #[error("Robot Framework source {0} has no uploaded archive")]
    MissingArchive(i32),
}
