// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::{
    application::dto::server_request::{
        ParameterRequestDto, ServerProfileRequestDto, TemplateServerRequestDto,
    },
    domain::{
        models::server::{
            NewParameter, NewServerProfile, NewTemplateServer, Parameter, ServerProfile,
            TemplateServer,
        },
        repositories::{server_repository::ServerRepository, task_repository::RepositoryError},
    },
};
use axum::http::StatusCode;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

#[derive(Error, Debug)]
pub enum ServerUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<ServerUseCaseError> for (StatusCode, String) {
    fn from(err: ServerUseCaseError) -> Self {
        let status = match &err {
            ServerUseCaseError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServerUseCaseError::NotFound(_)
            | ServerUseCaseError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ServerUseCaseError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, err.to_string())
    }
}

/// 解析 `params` 字段：参数ID数组的JSON字符串
pub fn parse_params(raw: Option<&str>) -> Result<Vec<i32>, ServerUseCaseError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(Vec::new());
    };

    let ids: Vec<i32> = serde_json::from_str(raw).map_err(|_| {
        ServerUseCaseError::ValidationError(format!(
            "params: expected a JSON array of parameter ids, got '{}'",
            raw
        ))
    })?;
    Ok(ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect())
}

/// 参数、服务器模板和服务器配置的管理
pub struct ServerUseCase<SVR> {
    server_repo: Arc<SVR>,
}

impl<SVR> ServerUseCase<SVR>
where
    SVR: ServerRepository + 'static,
{
    pub fn new(server_repo: Arc<SVR>) -> Self {
        Self { server_repo }
    }

    pub async fn create_parameter(
        &self,
        dto: ParameterRequestDto,
    ) -> Result<Parameter, ServerUseCaseError> {
        validate(&dto)?;
        Ok(self
            .server_repo
            .create_parameter(&NewParameter {
                name: dto.name,
                category: dto.category,
                description: dto.description,
            })
            .await?)
    }

    pub async fn get_parameter(&self, id: i32) -> Result<Parameter, ServerUseCaseError> {
        self.server_repo
            .find_parameter(id)
            .await?
            .ok_or(ServerUseCaseError::NotFound("Parameter"))
    }

    pub async fn list_parameters(&self) -> Result<Vec<Parameter>, ServerUseCaseError> {
        Ok(self.server_repo.list_parameters().await?)
    }

    pub async fn delete_parameter(&self, id: i32) -> Result<(), ServerUseCaseError> {
        self.server_repo
            .delete_parameter(id)
            .await
            .map_err(not_found("Parameter"))
    }

    /// 创建服务器模板，`params` 中的每个参数都必须存在
    pub async fn create_template(
        &self,
        dto: TemplateServerRequestDto,
    ) -> Result<TemplateServer, ServerUseCaseError> {
        validate(&dto)?;
        let parameters = parse_params(dto.params.as_deref())?;

        let found: BTreeSet<i32> = self
            .server_repo
            .find_parameters(&parameters)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        let missing: Vec<String> = parameters
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ServerUseCaseError::ValidationError(format!(
                "params: unknown parameter ids {}",
                missing.join(", ")
            )));
        }

        Ok(self
            .server_repo
            .create_template(&NewTemplateServer {
                name: dto.name,
                description: dto.description,
                category: dto.category,
                parameters,
            })
            .await?)
    }

    pub async fn get_template(&self, id: i32) -> Result<TemplateServer, ServerUseCaseError> {
        self.server_repo
            .find_template(id)
            .await?
            .ok_or(ServerUseCaseError::NotFound("Template server"))
    }

    pub async fn list_templates(&self) -> Result<Vec<TemplateServer>, ServerUseCaseError> {
        Ok(self.server_repo.list_templates().await?)
    }

    pub async fn delete_template(&self, id: i32) -> Result<(), ServerUseCaseError> {
        self.server_repo
            .delete_template(id)
            .await
            .map_err(not_found("Template server"))
    }

    pub async fn create_profile(
        &self,
        dto: ServerProfileRequestDto,
    ) -> Result<ServerProfile, ServerUseCaseError> {
        validate(&dto)?;
        if self.server_repo.find_template(dto.template_id).await?.is_none() {
            return Err(ServerUseCaseError::ValidationError(format!(
                "template: {} does not exist",
                dto.template_id
            )));
        }

        Ok(self
            .server_repo
            .create_profile(&NewServerProfile {
                name: dto.name,
                description: dto.description,
                template_id: dto.template_id,
                config: dto.config,
            })
            .await?)
    }

    pub async fn get_profile(&self, id: i32) -> Result<ServerProfile, ServerUseCaseError> {
        self.server_repo
            .find_profile(id)
            .await?
            .ok_or(ServerUseCaseError::NotFound("Server profile"))
    }

    pub async fn list_profiles(&self) -> Result<Vec<ServerProfile>, ServerUseCaseError> {
        Ok(self.server_repo.list_profiles().await?)
    }

    pub async fn delete_profile(&self, id: i32) -> Result<(), ServerUseCaseError> {
        self.server_repo
            .delete_profile(id)
            .await
            .map_err(not_found("Server profile"))
    }
}

fn validate<T: Validate>(dto: &T) -> Result<(), ServerUseCaseError> {
    dto.validate()
        .map_err(|e| ServerUseCaseError::ValidationError(e.to_string()))
}

fn not_found(what: &'static str) -> impl Fn(RepositoryError) -> ServerUseCaseError {
    move |e| match e {
        RepositoryError::NotFound => ServerUseCaseError::NotFound(what),
        other => other.into(),
    }
}
