use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::users::{InsertUserEntity, UserEntity};

#[async_trait]
#[automock]
pub trait UserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;

    async fn list_by_ids(&self, user_ids: Vec<Uuid>) -> Result<Vec<UserEntity>>;

    async fn insert(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity>;
}
