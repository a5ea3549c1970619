// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::command::{Argument, Command, NewArgument, NewCommand};
use crate::domain::repositories::command_repository::CommandRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::{argument, command, command_source};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// 命令与参数仓库实现
#[derive(Clone)]
pub struct CommandRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CommandRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn into_command(model: command::Model, source_ids: Vec<i32>) -> Command {
    Command {
        id: model.id,
        name: model.name,
        description: model.description,
        source_ids,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl From<argument::Model> for Argument {
    fn from(model: argument::Model) -> Self {
        Self {
            id: model.id,
            command_id: model.command_id,
            name: model.name,
            description: model.description,
            needs_value: model.needs_value,
        }
    }
}

async fn source_ids_of<C: ConnectionTrait>(
    conn: &C,
    command_id: i32,
) -> Result<Vec<i32>, RepositoryError> {
    let links = command_source::Entity::find()
        .filter(command_source::Column::CommandId.eq(command_id))
        .order_by_asc(command_source::Column::SourceId)
        .all(conn)
        .await?;
    Ok(links.into_iter().map(|l| l.source_id).collect())
}

/// 用给定的数据源集合替换命令的全部关联
async fn replace_links<C: ConnectionTrait>(
    conn: &C,
    command_id: i32,
    source_ids: &[i32],
) -> Result<Vec<i32>, RepositoryError> {
    command_source::Entity::delete_many()
        .filter(command_source::Column::CommandId.eq(command_id))
        .exec(conn)
        .await?;

    let unique: BTreeSet<i32> = source_ids.iter().copied().collect();
    if !unique.is_empty() {
        let links = unique.iter().map(|source_id| command_source::ActiveModel {
            command_id: Set(command_id),
            source_id: Set(*source_id),
        });
        command_source::Entity::insert_many(links)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(unique.into_iter().collect())
}

#[async_trait]
impl CommandRepository for CommandRepositoryImpl {
    async fn create(&self, new_command: &NewCommand) -> Result<Command, RepositoryError> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let model = command::ActiveModel {
            id: NotSet,
            name: Set(new_command.name.clone()),
            description: Set(new_command.description.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;

        let source_ids = replace_links(&txn, model.id, &new_command.source_ids).await?;
        txn.commit().await?;

        Ok(into_command(model, source_ids))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Command>, RepositoryError> {
        let Some(model) = command::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(None);
        };

        let source_ids = source_ids_of(self.db.as_ref(), id).await?;
        Ok(Some(into_command(model, source_ids)))
    }

    async fn list(&self) -> Result<Vec<Command>, RepositoryError> {
        let models = command::Entity::find()
            .order_by_asc(command::Column::Id)
            .all(self.db.as_ref())
            .await?;

        let mut links: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in command_source::Entity::find()
            .order_by_asc(command_source::Column::SourceId)
            .all(self.db.as_ref())
            .await?
        {
            links.entry(link.command_id).or_default().push(link.source_id);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let source_ids = links.remove(&model.id).unwrap_or_default();
                into_command(model, source_ids)
            })
            .collect())
    }

    async fn update(&self, cmd: &Command) -> Result<Command, RepositoryError> {
        let txn = self.db.begin().await?;

        let existing = command::Entity::find_by_id(cmd.id)
            .one(&txn)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: command::ActiveModel = existing.into();
        active.name = Set(cmd.name.clone());
        active.description = Set(cmd.description.clone());
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&txn).await?;

        let source_ids = replace_links(&txn, cmd.id, &cmd.source_ids).await?;
        txn.commit().await?;

        Ok(into_command(model, source_ids))
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let result = command::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        argument::Entity::delete_many()
            .filter(argument::Column::CommandId.eq(id))
            .exec(&txn)
            .await?;
        command_source::Entity::delete_many()
            .filter(command_source::Column::CommandId.eq(id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    async fn create_argument(&self, new_argument: &NewArgument) -> Result<Argument, RepositoryError> {
        let model = argument::ActiveModel {
            id: NotSet,
            command_id: Set(new_argument.command_id),
            name: Set(new_argument.name.clone()),
            description: Set(new_argument.description.clone()),
            needs_value: Set(new_argument.needs_value),
        }
        .insert(self.db.as_ref())
        .await?;

        Ok(model.into())
    }

    async fn find_argument(&self, id: i32) -> Result<Option<Argument>, RepositoryError> {
        let model = argument::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_arguments(
        &self,
        command_id: Option<i32>,
    ) -> Result<Vec<Argument>, RepositoryError> {
        let mut query = argument::Entity::find();
        if let Some(command_id) = command_id {
            query = query.filter(argument::Column::CommandId.eq(command_id));
        }

        let models = query
            .order_by_asc(argument::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update_argument(&self, arg: &Argument) -> Result<Argument, RepositoryError> {
        let existing = argument::Entity::find_by_id(arg.id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: argument::ActiveModel = existing.into();
        active.command_id = Set(arg.command_id);
        active.name = Set(arg.name.clone());
        active.description = Set(arg.description.clone());
        active.needs_value = Set(arg.needs_value);

        Ok(active.update(self.db.as_ref()).await?.into())
    }

    async fn delete_argument(&self, id: i32) -> Result<(), RepositoryError> {
        let result = argument::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
