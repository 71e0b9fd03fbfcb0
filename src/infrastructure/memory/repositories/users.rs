use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::users::{InsertUserEntity, UserEntity},
        repositories::users::UserRepository,
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct UserInMemory {
    db: Arc<MemoryDatabase>,
}

impl UserInMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserInMemory {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        let users = self.db.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn list_by_ids(&self, user_ids: Vec<Uuid>) -> Result<Vec<UserEntity>> {
        let users = self.db.users.read().await;
        Ok(user_ids
            .iter()
            .filter_map(|id| users.get(id).cloned())
            .collect())
    }

    async fn insert(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity> {
        let mut users = self.db.users.write().await;

        if users
            .values()
            .any(|u| u.username == insert_user_entity.username)
        {
            bail!(
                "unique constraint violated: users.username = {}",
                insert_user_entity.username
            );
        }

        let user = UserEntity {
            id: Uuid::new_v4(),
            username: insert_user_entity.username,
            email: insert_user_entity.email,
            first_name: insert_user_entity.first_name,
            last_name: insert_user_entity.last_name,
            created_at: insert_user_entity.created_at,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }
}
