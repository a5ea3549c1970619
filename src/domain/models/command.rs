// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 命令实体
///
/// 从一个或多个数据源中提取出的操作。同一命令可以被多个数据源共享。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// 引用该命令的数据源ID
    pub source_ids: Vec<i32>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCommand {
    pub name: String,
    pub description: Option<String>,
    pub source_ids: Vec<i32>,
}

/// 命令参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub id: i32,
    pub command_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub needs_value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArgument {
    pub command_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub needs_value: bool,
}

/// 判断数据源是否是命令的最后一个引用
///
/// `reference_count` 必须在解除当前数据源的关联之前读取，
/// 因此计数不大于 1 即表示没有其他数据源引用该命令。
pub fn is_sole_reference(reference_count: u64) -> bool {
    reference_count <= 1
}

/// 删除数据源后的命令清理结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceDeletion {
    pub source_id: i32,
    /// 随数据源一起删除的命令
    pub removed_commands: Vec<i32>,
    /// 仍被其他数据源引用而保留的命令
    pub retained_commands: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sole_reference_counts_before_unlink() {
        assert!(is_sole_reference(0));
        assert!(is_sole_reference(1));
        assert!(!is_sole_reference(2));
    }
}
