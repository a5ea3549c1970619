// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::server::{
    NewParameter, NewServerProfile, NewTemplateServer, Parameter, ServerProfile, TemplateServer,
};
use crate::domain::repositories::server_repository::ServerRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::repositories::ensure_deleted;
use crate::infrastructure::database::entities::{
    parameter, server_profile, template_server, template_server_parameter,
};
use async_trait::async_trait;
use sea_orm::*;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// 服务器目录仓库实现
#[derive(Clone)]
pub struct ServerRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ServerRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<parameter::Model> for Parameter {
    fn from(model: parameter::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            description: model.description,
        }
    }
}

impl From<server_profile::Model> for ServerProfile {
    fn from(model: server_profile::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            template_id: model.template_id,
            config: model.config,
        }
    }
}

fn into_template(model: template_server::Model, parameters: Vec<i32>) -> TemplateServer {
    TemplateServer {
        id: model.id,
        name: model.name,
        description: model.description,
        category: model.category,
        parameters,
    }
}

#[async_trait]
impl ServerRepository for ServerRepositoryImpl {
    async fn create_parameter(
        &self,
        new_parameter: &NewParameter,
    ) -> Result<Parameter, RepositoryError> {
        let model = parameter::ActiveModel {
            id: NotSet,
            name: Set(new_parameter.name.clone()),
            category: Set(new_parameter.category),
            description: Set(new_parameter.description.clone()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(model.into())
    }

    async fn find_parameter(&self, id: i32) -> Result<Option<Parameter>, RepositoryError> {
        let model = parameter::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_parameters(&self, ids: &[i32]) -> Result<Vec<Parameter>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = parameter::Entity::find()
            .filter(parameter::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(parameter::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_parameters(&self) -> Result<Vec<Parameter>, RepositoryError> {
        let models = parameter::Entity::find()
            .order_by_asc(parameter::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete_parameter(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;
        template_server_parameter::Entity::delete_many()
            .filter(template_server_parameter::Column::ParameterId.eq(id))
            .exec(&txn)
            .await?;
        let result = parameter::Entity::delete_by_id(id).exec(&txn).await?;
        ensure_deleted(result)?;
        txn.commit().await?;
        Ok(())
    }

    async fn create_template(
        &self,
        template: &NewTemplateServer,
    ) -> Result<TemplateServer, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = template_server::ActiveModel {
            id: NotSet,
            name: Set(template.name.clone()),
            description: Set(template.description.clone()),
            category: Set(template.category),
        }
        .insert(&txn)
        .await?;

        let parameters: BTreeSet<i32> = template.parameters.iter().copied().collect();
        if !parameters.is_empty() {
            let links = parameters
                .iter()
                .map(|parameter_id| template_server_parameter::ActiveModel {
                    template_server_id: Set(model.id),
                    parameter_id: Set(*parameter_id),
                });
            template_server_parameter::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(into_template(model, parameters.into_iter().collect()))
    }

    async fn find_template(&self, id: i32) -> Result<Option<TemplateServer>, RepositoryError> {
        let Some(model) = template_server::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(None);
        };

        let parameters = template_server_parameter::Entity::find()
            .filter(template_server_parameter::Column::TemplateServerId.eq(id))
            .order_by_asc(template_server_parameter::Column::ParameterId)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|link| link.parameter_id)
            .collect();

        Ok(Some(into_template(model, parameters)))
    }

    async fn list_templates(&self) -> Result<Vec<TemplateServer>, RepositoryError> {
        let models = template_server::Entity::find()
            .order_by_asc(template_server::Column::Id)
            .all(self.db.as_ref())
            .await?;

        let mut links: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in template_server_parameter::Entity::find()
            .order_by_asc(template_server_parameter::Column::ParameterId)
            .all(self.db.as_ref())
            .await?
        {
            links
                .entry(link.template_server_id)
                .or_default()
                .push(link.parameter_id);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let parameters = links.remove(&model.id).unwrap_or_default();
                into_template(model, parameters)
            })
            .collect())
    }

    async fn delete_template(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;
        template_server_parameter::Entity::delete_many()
            .filter(template_server_parameter::Column::TemplateServerId.eq(id))
            .exec(&txn)
            .await?;
        // 配置档依附于模板，随模板一起删除
        server_profile::Entity::delete_many()
            .filter(server_profile::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;
        let result = template_server::Entity::delete_by_id(id).exec(&txn).await?;
        ensure_deleted(result)?;
        txn.commit().await?;
        Ok(())
    }

    async fn create_profile(
        &self,
        profile: &NewServerProfile,
    ) -> Result<ServerProfile, RepositoryError> {
        let model = server_profile::ActiveModel {
            id: NotSet,
            name: Set(profile.name.clone()),
            description: Set(profile.description.clone()),
            template_id: Set(profile.template_id),
            config: Set(profile.config.clone()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(model.into())
    }

    async fn find_profile(&self, id: i32) -> Result<Option<ServerProfile>, RepositoryError> {
        let model = server_profile::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_profiles(&self) -> Result<Vec<ServerProfile>, RepositoryError> {
        let models = server_profile::Entity::find()
            .order_by_asc(server_profile::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete_profile(&self, id: i32) -> Result<(), RepositoryError> {
        let result = server_profile::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        ensure_deleted(result)
    }
}
