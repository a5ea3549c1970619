// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::server::{
    NewParameter, NewServerProfile, NewTemplateServer, Parameter, ServerProfile, TemplateServer,
};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;

/// 服务器目录仓库特质
///
/// 管理参数、服务器模板和服务器配置档
#[async_trait]
pub trait ServerRepository: Send + Sync {
    async fn create_parameter(&self, parameter: &NewParameter)
        -> Result<Parameter, RepositoryError>;
    async fn find_parameter(&self, id: i32) -> Result<Option<Parameter>, RepositoryError>;
    async fn find_parameters(&self, ids: &[i32]) -> Result<Vec<Parameter>, RepositoryError>;
    async fn list_parameters(&self) -> Result<Vec<Parameter>, RepositoryError>;
    async fn delete_parameter(&self, id: i32) -> Result<(), RepositoryError>;

    /// 创建服务器模板并关联参数
    async fn create_template(
        &self,
        template: &NewTemplateServer,
    ) -> Result<TemplateServer, RepositoryError>;
    async fn find_template(&self, id: i32) -> Result<Option<TemplateServer>, RepositoryError>;
    async fn list_templates(&self) -> Result<Vec<TemplateServer>, RepositoryError>;
    /// 删除模板及其参数关联和配置档
    async fn delete_template(&self, id: i32) -> Result<(), RepositoryError>;

    async fn create_profile(
        &self,
        profile: &NewServerProfile,
    ) -> Result<ServerProfile, RepositoryError>;
    async fn find_profile(&self, id: i32) -> Result<Option<ServerProfile>, RepositoryError>;
    async fn list_profiles(&self) -> Result<Vec<ServerProfile>, RepositoryError>;
    async fn delete_profile(&self, id: i32) -> Result<(), RepositoryError>;
}
