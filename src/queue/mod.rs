// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 向外部工作器提交提取任务并查询其状态
pub mod extraction_queue;
