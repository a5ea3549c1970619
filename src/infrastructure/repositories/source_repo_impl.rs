// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::command::{is_sole_reference, SourceDeletion};
use crate::domain::models::source::{
    NewSource, ProductSettings, Source, SourceCategory, SourceKind,
};
use crate::domain::repositories::source_repository::SourceRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::{
    argument, command, command_source, source as source_entity,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::debug;

/// 数据源仓库实现
///
/// 基于SeaORM实现，类别相关字段按列平铺存储
#[derive(Clone)]
pub struct SourceRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SourceRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<source_entity::Model> for Source {
    type Error = RepositoryError;

    fn try_from(model: source_entity::Model) -> Result<Self, Self::Error> {
        let category = SourceCategory::try_from(model.category)
            .map_err(|e| RepositoryError::Database(DbErr::Custom(e.to_string())))?;

        let kind = match category {
            SourceCategory::Products => SourceKind::Products(ProductSettings {
                regex: model.regex.unwrap_or_default(),
                path: model.path.unwrap_or_default(),
                host: model.host.unwrap_or_default(),
                port: model.port,
                username: model.username,
                password: model.password,
            }),
            SourceCategory::RobotFramework => SourceKind::RobotFramework {
                archive: model.zip_file,
            },
            SourceCategory::Libraries => SourceKind::Libraries {
                url: model.url.unwrap_or_default(),
            },
        };

        Ok(Self {
            id: model.id,
            name: model.name,
            description: model.description,
            kind,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// 将类别配置写入平铺的列，其他类别的列置空
fn apply_kind(active: &mut source_entity::ActiveModel, kind: &SourceKind) {
    active.category = Set(kind.category().code());
    active.regex = Set(None);
    active.path = Set(None);
    active.host = Set(None);
    active.port = Set(None);
    active.username = Set(None);
    active.password = Set(None);
    active.zip_file = Set(None);
    active.url = Set(None);

    match kind {
        SourceKind::Products(settings) => {
            active.regex = Set(Some(settings.regex.clone()));
            active.path = Set(Some(settings.path.clone()));
            active.host = Set(Some(settings.host.clone()));
            active.port = Set(settings.port);
            active.username = Set(settings.username.clone());
            active.password = Set(settings.password.clone());
        }
        SourceKind::RobotFramework { archive } => {
            active.zip_file = Set(archive.clone());
        }
        SourceKind::Libraries { url } => {
            active.url = Set(Some(url.clone()));
        }
    }
}

#[async_trait]
impl SourceRepository for SourceRepositoryImpl {
    async fn create(&self, source: &NewSource) -> Result<Source, RepositoryError> {
        let now = Utc::now();
        let mut active = source_entity::ActiveModel {
            id: NotSet,
            name: Set(source.name.clone()),
            description: Set(source.description.clone()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };
        apply_kind(&mut active, &source.kind);

        let model = active.insert(self.db.as_ref()).await?;
        model.try_into()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Source>, RepositoryError> {
        source_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(Source::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Source>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        source_entity::Entity::find()
            .filter(source_entity::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(source_entity::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Source::try_from)
            .collect()
    }

    async fn list(
        &self,
        category: Option<SourceCategory>,
    ) -> Result<Vec<Source>, RepositoryError> {
        let mut query = source_entity::Entity::find();
        if let Some(category) = category {
            query = query.filter(source_entity::Column::Category.eq(category.code()));
        }

        query
            .order_by_asc(source_entity::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Source::try_from)
            .collect()
    }

    async fn update(&self, source: &Source) -> Result<Source, RepositoryError> {
        let existing = source_entity::Entity::find_by_id(source.id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: source_entity::ActiveModel = existing.into();
        active.name = Set(source.name.clone());
        active.description = Set(source.description.clone());
        active.updated_at = Set(Utc::now().into());
        apply_kind(&mut active, &source.kind);

        let model = active.update(self.db.as_ref()).await?;
        model.try_into()
    }

    async fn delete(&self, id: i32) -> Result<SourceDeletion, RepositoryError> {
        let txn = self.db.begin().await?;

        if source_entity::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let links = command_source::Entity::find()
            .filter(command_source::Column::SourceId.eq(id))
            .all(&txn)
            .await?;

        let mut deletion = SourceDeletion {
            source_id: id,
            ..Default::default()
        };

        for link in links {
            let references = command_source::Entity::find()
                .filter(command_source::Column::CommandId.eq(link.command_id))
                .count(&txn)
                .await?;

            if is_sole_reference(references) {
                argument::Entity::delete_many()
                    .filter(argument::Column::CommandId.eq(link.command_id))
                    .exec(&txn)
                    .await?;
                command_source::Entity::delete_many()
                    .filter(command_source::Column::CommandId.eq(link.command_id))
                    .exec(&txn)
                    .await?;
                command::Entity::delete_by_id(link.command_id)
                    .exec(&txn)
                    .await?;
                deletion.removed_commands.push(link.command_id);
            } else {
                command_source::Entity::delete_many()
                    .filter(command_source::Column::CommandId.eq(link.command_id))
                    .filter(command_source::Column::SourceId.eq(id))
                    .exec(&txn)
                    .await?;
                deletion.retained_commands.push(link.command_id);
            }
        }

        source_entity::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        debug!(
            "Deleted source {} (removed commands: {:?}, retained: {:?})",
            id, deletion.removed_commands, deletion.retained_commands
        );

        Ok(deletion)
    }
}

#[cfg(test)]
#[path = "source_repo_impl_test.rs"]
mod tests;
