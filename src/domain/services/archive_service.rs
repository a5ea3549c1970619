// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};
use rand::distr::Alphanumeric;
use rand::Rng;
use regex::Regex;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use tracing::debug;

const ARCHIVE_DIR: &str = "zip";
const SUFFIX_LEN: usize = 7;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("Failed to compile filename regex"));

/// 上传压缩包的保存服务
///
/// 文件保存在 `zip/` 目录下，重名时追加随机后缀，返回公开URL。
#[derive(Clone)]
pub struct ArchiveService {
    storage: Arc<dyn StorageRepository>,
    media_url: String,
}

impl ArchiveService {
    pub fn new(storage: Arc<dyn StorageRepository>, media_url: impl Into<String>) -> Self {
        Self {
            storage,
            media_url: media_url.into(),
        }
    }

    /// 保存压缩包并返回其公开URL
    ///
    /// 每次写入都以独占方式创建文件，并发上传同名文件时各自得到不同的存储名。
    pub async fn save_archive(&self, filename: &str, data: &[u8]) -> Result<String, StorageError> {
        let name = sanitize_filename(filename);
        let mut stored = name.clone();

        loop {
            match self
                .storage
                .save_new(&format!("{}/{}", ARCHIVE_DIR, stored), data)
                .await
            {
                Ok(()) => break,
                Err(StorageError::AlreadyExists(_)) => {
                    stored = with_suffix(&name, &random_suffix());
                }
                Err(e) => return Err(e),
            }
        }
        debug!("Saved archive {} ({} bytes)", stored, data.len());

        Ok(format!("{}{}/{}", self.media_url, ARCHIVE_DIR, stored))
    }

    /// 删除由 `save_archive` 保存的压缩包，URL 不属于本服务时忽略
    pub async fn discard_archive(&self, url: &str) -> Result<(), StorageError> {
        match url.strip_prefix(self.media_url.as_str()) {
            Some(key) => {
                self.storage.delete(key).await?;
                debug!("Discarded archive {}", key);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// 只保留文件名部分，并替换不安全字符
fn sanitize_filename(filename: &str) -> String {
    let base = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let cleaned = UNSAFE_CHARS.replace_all(base, "_");
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "archive.zip".to_string()
    } else {
        cleaned.to_string()
    }
}

fn random_suffix() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect()
}

/// `suite.zip` + `aB3dE9x` -> `suite_aB3dE9x.zip`
fn with_suffix(name: &str, suffix: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, suffix, ext),
        _ => format!("{}_{}", name, suffix),
    }
}
