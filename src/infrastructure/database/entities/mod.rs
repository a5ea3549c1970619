// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库实体模块
///
/// 定义数据库表对应的实体结构
/// 使用SeaORM框架进行对象关系映射
pub mod argument;
pub mod collection;
pub mod collection_keyword;
pub mod command;
pub mod command_source;
pub mod keyword;
pub mod parameter;
pub mod server_profile;
pub mod source;
pub mod task;
pub mod template_server;
pub mod template_server_parameter;
