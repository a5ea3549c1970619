// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::testing::{Collection, Keyword, NewCollection, NewKeyword};
use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::repositories::testing_repository::TestingRepository;
use crate::infrastructure::database::entities::{collection, collection_keyword, keyword};
use crate::infrastructure::repositories::ensure_deleted;
use async_trait::async_trait;
use sea_orm::*;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// 测试目录仓库实现
#[derive(Clone)]
pub struct TestingRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TestingRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<keyword::Model> for Keyword {
    fn from(model: keyword::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            description: model.description,
            script: model.script,
        }
    }
}

fn into_collection(model: collection::Model, keywords: Vec<i32>) -> Collection {
    Collection {
        id: model.id,
        name: model.name,
        description: model.description,
        keywords,
    }
}

#[async_trait]
impl TestingRepository for TestingRepositoryImpl {
    async fn create_keyword(&self, new_keyword: &NewKeyword) -> Result<Keyword, RepositoryError> {
        let model = keyword::ActiveModel {
            id: NotSet,
            user_id: Set(new_keyword.user_id),
            name: Set(new_keyword.name.clone()),
            description: Set(new_keyword.description.clone()),
            script: Set(new_keyword.script.clone()),
        }
        .insert(self.db.as_ref())
        .await?;
        Ok(model.into())
    }

    async fn find_keyword(&self, id: i32) -> Result<Option<Keyword>, RepositoryError> {
        let model = keyword::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn find_keywords(&self, ids: &[i32]) -> Result<Vec<Keyword>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = keyword::Entity::find()
            .filter(keyword::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(keyword::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_keywords(&self) -> Result<Vec<Keyword>, RepositoryError> {
        let models = keyword::Entity::find()
            .order_by_asc(keyword::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete_keyword(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;
        collection_keyword::Entity::delete_many()
            .filter(collection_keyword::Column::KeywordId.eq(id))
            .exec(&txn)
            .await?;
        let result = keyword::Entity::delete_by_id(id).exec(&txn).await?;
        ensure_deleted(result)?;
        txn.commit().await?;
        Ok(())
    }

    async fn create_collection(
        &self,
        new_collection: &NewCollection,
    ) -> Result<Collection, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = collection::ActiveModel {
            id: NotSet,
            name: Set(new_collection.name.clone()),
            description: Set(new_collection.description.clone()),
        }
        .insert(&txn)
        .await?;

        let keywords: BTreeSet<i32> = new_collection.keywords.iter().copied().collect();
        if !keywords.is_empty() {
            let links = keywords
                .iter()
                .map(|keyword_id| collection_keyword::ActiveModel {
                    collection_id: Set(model.id),
                    keyword_id: Set(*keyword_id),
                });
            collection_keyword::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(into_collection(model, keywords.into_iter().collect()))
    }

    async fn find_collection(&self, id: i32) -> Result<Option<Collection>, RepositoryError> {
        let Some(model) = collection::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
        else {
            return Ok(None);
        };

        let keywords = collection_keyword::Entity::find()
            .filter(collection_keyword::Column::CollectionId.eq(id))
            .order_by_asc(collection_keyword::Column::KeywordId)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|link| link.keyword_id)
            .collect();

        Ok(Some(into_collection(model, keywords)))
    }

    async fn list_collections(&self) -> Result<Vec<Collection>, RepositoryError> {
        let models = collection::Entity::find()
            .order_by_asc(collection::Column::Id)
            .all(self.db.as_ref())
            .await?;

        let mut links: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in collection_keyword::Entity::find()
            .order_by_asc(collection_keyword::Column::KeywordId)
            .all(self.db.as_ref())
            .await?
        {
            links.entry(link.collection_id).or_default().push(link.keyword_id);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let keywords = links.remove(&model.id).unwrap_or_default();
                into_collection(model, keywords)
            })
            .collect())
    }

    async fn delete_collection(&self, id: i32) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;
        collection_keyword::Entity::delete_many()
            .filter(collection_keyword::Column::CollectionId.eq(id))
            .exec(&txn)
            .await?;
        let result = collection::Entity::delete_by_id(id).exec(&txn).await?;
        ensure_deleted(result)?;
        txn.commit().await?;
        Ok(())
    }
}
