// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::extraction::JobState;
use crate::domain::models::task::{NewTask, Task};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::infrastructure::database::entities::task as task_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use tracing::warn;

/// 任务仓库实现
///
/// 基于SeaORM实现的任务跟踪记录数据访问层
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<task_entity::Model> for Task {
    type Error = RepositoryError;

    /// 状态与队列读取时一致，无法识别的状态视为错误，不回落为 PENDING
    fn try_from(model: task_entity::Model) -> Result<Self, Self::Error> {
        let state = model.state.parse::<JobState>().map_err(|_| {
            warn!("Task {} has unknown state {:?}", model.task_id, model.state);
            RepositoryError::InvalidState(model.state.clone())
        })?;
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            task_id: model.task_id,
            state,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn create(&self, task: &NewTask) -> Result<Task, RepositoryError> {
        let now = Utc::now();
        let model = task_entity::ActiveModel {
            id: NotSet,
            user_id: Set(task.user_id),
            name: Set(task.name.clone()),
            task_id: Set(task.task_id.clone()),
            state: Set(task.state.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = model.insert(self.db.as_ref()).await?;
        inserted.try_into()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        model.map(Task::try_from).transpose()
    }

    async fn find_by_task_id(&self, task_id: &str) -> Result<Option<Task>, RepositoryError> {
        let model = task_entity::Entity::find()
            .filter(task_entity::Column::TaskId.eq(task_id))
            .one(self.db.as_ref())
            .await?;

        model.map(Task::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Task>, RepositoryError> {
        let models = task_entity::Entity::find()
            .filter(task_entity::Column::UserId.eq(user_id))
            .order_by_asc(task_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        models.into_iter().map(Task::try_from).collect()
    }

    async fn update_state(&self, id: i32, state: JobState) -> Result<Task, RepositoryError> {
        let existing = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)?;

        let mut active: task_entity::ActiveModel = existing.into();
        active.state = Set(state.to_string());
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(self.db.as_ref()).await?;
        updated.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::extraction::JobHandle;
    use crate::infrastructure::database::connection::create_memory_pool;

    #[tokio::test]
    async fn test_unknown_stored_state_is_an_error() {
        let db = Arc::new(create_memory_pool().await.unwrap());
        let repository = TaskRepositoryImpl::new(db.clone());
        let handle = JobHandle {
            task_id: "job-a".to_string(),
            state: JobState::Pending,
        };
        let task = repository
            .create(&NewTask::new(2, "Extract commands from robot", &handle))
            .await
            .unwrap();
        assert_eq!(task.state, JobState::Pending);

        let mut active: task_entity::ActiveModel = task_entity::Entity::find_by_id(task.id)
            .one(db.as_ref())
            .await
            .unwrap()
            .unwrap()
            .into();
        active.state = Set("PAUSED".to_string());
        active.update(db.as_ref()).await.unwrap();

        assert!(matches!(
            repository.find_by_id(task.id).await,
            Err(RepositoryError::InvalidState(ref s)) if s == "PAUSED"
        ));
        assert!(matches!(
            repository.list_for_user(2).await,
            Err(RepositoryError::InvalidState(_))
        ));

        // 写回已知状态后恢复可读
        let updated = repository
            .update_state(task.id, JobState::Success)
            .await
            .unwrap();
        assert_eq!(updated.state, JobState::Success);
    }
}
