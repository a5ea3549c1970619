// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 命令仓库（command_repository）：命令、参数及数据源关联
/// - 服务器仓库（server_repository）：参数、服务器模板和配置档
/// - 数据源仓库（source_repository）：数据源及其级联删除
/// - 存储仓库（storage_repository）：上传文件的存储
/// - 任务仓库（task_repository）：异步任务跟踪记录
/// - 测试仓库（testing_repository）：关键字和集合
pub mod command_repository;
pub mod server_repository;
pub mod source_repository;
pub mod storage_repository;
pub mod task_repository;
pub mod testing_repository;
