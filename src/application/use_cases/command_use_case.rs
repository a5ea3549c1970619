// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::{
    application::dto::{
        command_request::{
            ArgumentRequestDto, BasicCommandDto, CommandDetailDto, CommandRequestDto,
        },
        source_request::SourceDto,
    },
    domain::{
        models::command::{Argument, Command, NewArgument, NewCommand},
        repositories::{
            command_repository::CommandRepository, source_repository::SourceRepository,
            task_repository::RepositoryError,
        },
    },
};
use axum::http::StatusCode;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use validator::Validate;

#[derive(Error, Debug)]
pub enum CommandUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Command not found")]
    CommandNotFound,
    #[error("Argument not found")]
    ArgumentNotFound,
}

impl From<CommandUseCaseError> for (StatusCode, String) {
    fn from(err: CommandUseCaseError) -> Self {
        let status = match &err {
            CommandUseCaseError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CommandUseCaseError::CommandNotFound
            | CommandUseCaseError::ArgumentNotFound
            | CommandUseCaseError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            CommandUseCaseError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, err.to_string())
    }
}

/// 命令和参数的管理
pub struct CommandUseCase<CR, SR> {
    command_repo: Arc<CR>,
    source_repo: Arc<SR>,
}

impl<CR, SR> CommandUseCase<CR, SR>
where
    CR: CommandRepository + 'static,
    SR: SourceRepository + 'static,
{
    pub fn new(command_repo: Arc<CR>, source_repo: Arc<SR>) -> Self {
        Self {
            command_repo,
            source_repo,
        }
    }

    pub async fn create(&self, dto: CommandRequestDto) -> Result<CommandDetailDto, CommandUseCaseError> {
        dto.validate()
            .map_err(|e| CommandUseCaseError::ValidationError(e.to_string()))?;
        self.ensure_sources_exist(&dto.source_ids).await?;

        let command = self
            .command_repo
            .create(&NewCommand {
                name: dto.name,
                description: dto.description,
                source_ids: dto.source_ids,
            })
            .await?;
        info!("Created command {} ({})", command.id, command.name);
        self.detail(command).await
    }

    pub async fn get(&self, id: i32) -> Result<CommandDetailDto, CommandUseCaseError> {
        let command = self.find_command(id).await?;
        self.detail(command).await
    }

    /// 所有命令，附带参数和数据源
    pub async fn list(&self) -> Result<Vec<CommandDetailDto>, CommandUseCaseError> {
        let commands = self.command_repo.list().await?;

        let mut arguments: HashMap<i32, Vec<Argument>> = HashMap::new();
        for argument in self.command_repo.list_arguments(None).await? {
            arguments.entry(argument.command_id).or_default().push(argument);
        }

        let source_ids: Vec<i32> = commands
            .iter()
            .flat_map(|c| c.source_ids.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let sources: HashMap<i32, SourceDto> = self
            .source_repo
            .find_by_ids(&source_ids)
            .await?
            .iter()
            .map(|s| (s.id, SourceDto::from(s)))
            .collect();

        Ok(commands
            .into_iter()
            .map(|command| {
                let args = arguments.remove(&command.id).unwrap_or_default();
                let srcs = command
                    .source_ids
                    .iter()
                    .filter_map(|id| sources.get(id).cloned())
                    .collect();
                CommandDetailDto::new(command, args, srcs)
            })
            .collect())
    }

    /// 只含 `id, name, description` 的命令列表
    pub async fn list_basic(&self) -> Result<Vec<BasicCommandDto>, CommandUseCaseError> {
        let commands = self.command_repo.list().await?;
        Ok(commands.into_iter().map(BasicCommandDto::from).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        dto: CommandRequestDto,
    ) -> Result<CommandDetailDto, CommandUseCaseError> {
        dto.validate()
            .map_err(|e| CommandUseCaseError::ValidationError(e.to_string()))?;
        let mut command = self.find_command(id).await?;
        self.ensure_sources_exist(&dto.source_ids).await?;

        command.name = dto.name;
        command.description = dto.description;
        command.source_ids = dto.source_ids;
        let command = self.command_repo.update(&command).await?;
        self.detail(command).await
    }

    /// 删除命令及其全部参数和数据源关联
    pub async fn delete(&self, id: i32) -> Result<(), CommandUseCaseError> {
        self.command_repo.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CommandUseCaseError::CommandNotFound,
            other => other.into(),
        })?;
        info!("Deleted command {}", id);
        Ok(())
    }

    pub async fn create_argument(
        &self,
        dto: ArgumentRequestDto,
    ) -> Result<Argument, CommandUseCaseError> {
        dto.validate()
            .map_err(|e| CommandUseCaseError::ValidationError(e.to_string()))?;
        self.ensure_command_exists(dto.command_id).await?;

        let argument = self
            .command_repo
            .create_argument(&NewArgument {
                command_id: dto.command_id,
                name: dto.name,
                description: dto.description,
                needs_value: dto.needs_value,
            })
            .await?;
        Ok(argument)
    }

    pub async fn get_argument(&self, id: i32) -> Result<Argument, CommandUseCaseError> {
        self.command_repo
            .find_argument(id)
            .await?
            .ok_or(CommandUseCaseError::ArgumentNotFound)
    }

    pub async fn list_arguments(
        &self,
        command_id: Option<i32>,
    ) -> Result<Vec<Argument>, CommandUseCaseError> {
        Ok(self.command_repo.list_arguments(command_id).await?)
    }

    pub async fn update_argument(
        &self,
        id: i32,
        dto: ArgumentRequestDto,
    ) -> Result<Argument, CommandUseCaseError> {
        dto.validate()
            .map_err(|e| CommandUseCaseError::ValidationError(e.to_string()))?;
        let mut argument = self.get_argument(id).await?;
        self.ensure_command_exists(dto.command_id).await?;

        argument.command_id = dto.command_id;
        argument.name = dto.name;
        argument.description = dto.description;
        argument.needs_value = dto.needs_value;
        Ok(self.command_repo.update_argument(&argument).await?)
    }

    pub async fn delete_argument(&self, id: i32) -> Result<(), CommandUseCaseError> {
        self.command_repo
            .delete_argument(id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CommandUseCaseError::ArgumentNotFound,
                other => other.into(),
            })
    }

    async fn find_command(&self, id: i32) -> Result<Command, CommandUseCaseError> {
        self.command_repo
            .find_by_id(id)
            .await?
            .ok_or(CommandUseCaseError::CommandNotFound)
    }

    async fn ensure_command_exists(&self, id: i32) -> Result<(), CommandUseCaseError> {
        match self.command_repo.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(CommandUseCaseError::ValidationError(format!(
                "command: {} does not exist",
                id
            ))),
        }
    }

    async fn ensure_sources_exist(&self, ids: &[i32]) -> Result<(), CommandUseCaseError> {
        let wanted: BTreeSet<i32> = ids.iter().copied().collect();
        let found: BTreeSet<i32> = self
            .source_repo
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        let missing: Vec<String> = wanted.difference(&found).map(|id| id.to_string()).collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommandUseCaseError::ValidationError(format!(
                "source: unknown ids {}",
                missing.join(", ")
            )))
        }
    }

    async fn detail(&self, command: Command) -> Result<CommandDetailDto, CommandUseCaseError> {
        let arguments = self.command_repo.list_arguments(Some(command.id)).await?;
        let sources = self
            .source_repo
            .find_by_ids(&command.source_ids)
            .await?
            .iter()
            .map(SourceDto::from)
            .collect();
        Ok(CommandDetailDto::new(command, arguments, sources))
    }
}
