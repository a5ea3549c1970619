// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 数据源（source）：产品目录、Robot Framework 套件和库
/// - 命令（command）：从数据源提取的命令及其参数
/// - 提取（extraction）：提交给工作器的配置和任务句柄
/// - 任务（task）：用户发起的异步任务跟踪记录
/// - 服务器（server）与测试（testing）目录
pub mod command;
pub mod extraction;
pub mod server;
pub mod source;
pub mod task;
pub mod testing;
