// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 非法的存储键
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
    /// 键已被占用
    #[error("Storage key already exists: {0}")]
    AlreadyExists(String),
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 存储仓库特质
///
/// 上传文件（如 Robot Framework 压缩包）的保存接口。
/// 键是相对于存储根目录的路径，例如 `zip/suite.zip`。
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 以新键保存数据，键已存在时返回 `AlreadyExists`，不覆盖原有内容
    async fn save_new(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// 根据键删除数据，键不存在时不报错
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
