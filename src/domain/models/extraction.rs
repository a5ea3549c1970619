// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use super::source::{DomainError, ProductSettings, Source, SourceCategory, SourceKind};

/// 提取任务配置
///
/// 提交给外部工作器的负载，每种数据源类别对应一个变体。
/// 序列化后的键集合由工作器约定，见 [`ExtractionConfig::to_payload`]。
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionConfig {
    Products {
        source: i32,
        settings: ProductSettings,
    },
    RobotFramework {
        source: i32,
        zip: String,
    },
    Libraries {
        source: i32,
        url: String,
    },
}

impl ExtractionConfig {
    /// 根据已保存的数据源构建提取配置
    ///
    /// 没有压缩包的 Robot Framework 数据源无法提取。
    pub fn for_source(source: &Source) -> Result<Self, DomainError> {
        match &source.kind {
            SourceKind::Products(settings) => Ok(ExtractionConfig::Products {
                source: source.id,
                settings: settings.clone(),
            }),
            SourceKind::RobotFramework { archive } => archive
                .as_ref()
                .map(|zip| ExtractionConfig::RobotFramework {
                    source: source.id,
                    zip: zip.clone(),
                })
                .ok_or(DomainError::MissingArchive(source.id)),
            SourceKind::Libraries { url } => Ok(ExtractionConfig::Libraries {
                source: source.id,
                url: url.clone(),
            }),
        }
    }

    pub fn category(&self) -> SourceCategory {
        match self {
            ExtractionConfig::Products { .. } => SourceCategory::Products,
            ExtractionConfig::RobotFramework { .. } => SourceCategory::RobotFramework,
            ExtractionConfig::Libraries { .. } => SourceCategory::Libraries,
        }
    }

    pub fn source_id(&self) -> i32 {
        match self {
            ExtractionConfig::Products { source, .. }
            | ExtractionConfig::RobotFramework { source, .. }
            | ExtractionConfig::Libraries { source, .. } => *source,
        }
    }

    /// 工作器负载
    ///
    /// - Products: `{category, source, regex, path, host, port, username, password}`
    /// - Robot Framework: `{category, source, zip}`
    /// - Libraries: `{category, source, url}`
    pub fn to_payload(&self) -> Value {
        let category = self.category().code();
        match self {
            ExtractionConfig::Products { source, settings } => json!({
                "category": category,
                "source": source,
                "regex": settings.regex,
                "path": settings.path,
                "host": settings.host,
                "port": settings.port,
                "username": settings.username,
                "password": settings.password,
            }),
            ExtractionConfig::RobotFramework { source, zip } => json!({
                "category": category,
                "source": source,
                "zip": zip,
            }),
            ExtractionConfig::Libraries { source, url } => json!({
                "category": category,
                "source": source,
                "url": url,
            }),
        }
    }
}

/// 提取任务在工作器中的状态
///
/// 与工作器写回的状态字符串一一对应。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobState {
    /// 已提交，尚未被工作器接收
    #[default]
    Pending,
    Received,
    Started,
    Retry,
    Success,
    Failure,
    Revoked,
}

impl JobState {
    /// 任务是否已到达终态
    pub fn is_ready(self) -> bool {
        matches!(
            self,
            JobState::Success | JobState::Failure | JobState::Revoked
        )
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobState::Pending => write!(f, "PENDING"),
            JobState::Received => write!(f, "RECEIVED"),
            JobState::Started => write!(f, "STARTED"),
            JobState::Retry => write!(f, "RETRY"),
            JobState::Success => write!(f, "SUCCESS"),
            JobState::Failure => write!(f, "FAILURE"),
            JobState::Revoked => write!(f, "REVOKED"),
        }
    }
}

impl FromStr for JobState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(JobState::Pending),
            "RECEIVED" => Ok(JobState::Received),
            "STARTED" => Ok(JobState::Started),
            "RETRY" => Ok(JobState::Retry),
            "SUCCESS" => Ok(JobState::Success),
            "FAILURE" => Ok(JobState::Failure),
            "REVOKED" => Ok(JobState::Revoked),
            _ => Err(()),
        }
    }
}

/// 工作器返回的任务句柄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub task_id: String,
    pub state: JobState,
}

/// 一次提取提交：配置、发起用户和跟踪名称
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub owner: i32,
    pub name: String,
    pub config: ExtractionConfig,
}

impl ExtractionRequest {
    pub fn new(owner: i32, category: SourceCategory, config: ExtractionConfig) -> Self {
        Self {
            owner,
            name: format!("Extract commands from {}", category.slug()),
            config,
        }
    }
}

/// 已被队列接受但未写入跟踪记录的任务
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UntrackedJob {
    pub owner: i32,
    pub name: String,
    pub handle: JobHandle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn source(id: i32, kind: SourceKind) -> Source {
        Source {
            id,
            name: "src".to_string(),
            description: None,
            kind,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn keys(value: &Value) -> BTreeSet<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_products_payload_keys() {
        let settings = ProductSettings {
            regex: r"^show \w+".to_string(),
            path: "/cli".to_string(),
            host: "10.0.0.1".to_string(),
            port: Some(22),
            username: Some("admin".to_string()),
            password: None,
        };
        let config =
            ExtractionConfig::for_source(&source(7, SourceKind::Products(settings))).unwrap();
        let payload = config.to_payload();

        let expected: BTreeSet<String> = [
            "category", "source", "regex", "path", "host", "port", "username", "password",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(keys(&payload), expected);
        assert_eq!(payload["category"], 3);
        assert_eq!(payload["source"], 7);
        assert_eq!(payload["port"], 22);
        assert!(payload["password"].is_null());
    }

    #[test]
    fn test_libraries_payload_keys() {
        let kind = SourceKind::Libraries {
            url: "https://robotframework.org/SeleniumLibrary/".to_string(),
        };
        let payload = ExtractionConfig::for_source(&source(3, kind))
            .unwrap()
            .to_payload();

        let expected: BTreeSet<String> = ["category", "source", "url"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(keys(&payload), expected);
        assert_eq!(payload["category"], 5);
    }

    #[test]
    fn test_robot_payload_requires_archive() {
        let missing = source(9, SourceKind::RobotFramework { archive: None });
        assert_eq!(
            ExtractionConfig::for_source(&missing),
            Err(DomainError::MissingArchive(9))
        );

        let present = source(
            9,
            SourceKind::RobotFramework {
                archive: Some("/media/zip/suite.zip".to_string()),
            },
        );
        let payload = ExtractionConfig::for_source(&present).unwrap().to_payload();
        assert_eq!(payload["zip"], "/media/zip/suite.zip");
        assert_eq!(payload["category"], 4);
        assert_eq!(payload.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_request_name_uses_slug() {
        let config = ExtractionConfig::Libraries {
            source: 1,
            url: "https://example.com".to_string(),
        };
        let request = ExtractionRequest::new(42, SourceCategory::Libraries, config);
        assert_eq!(request.name, "Extract commands from libraries");
        assert_eq!(request.owner, 42);
    }

    #[test]
    fn test_job_state_round_trip_strings() {
        assert_eq!("SUCCESS".parse::<JobState>(), Ok(JobState::Success));
        assert_eq!(JobState::Pending.to_string(), "PENDING");
        assert!("done".parse::<JobState>().is_err());
        assert!(JobState::Failure.is_ready());
        assert!(!JobState::Started.is_ready());
    }
}
