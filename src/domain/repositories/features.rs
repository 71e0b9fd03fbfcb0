use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::features::{FeatureEntity, InsertFeatureEntity};

#[async_trait]
#[automock]
pub trait FeatureRepository {
    async fn find_by_id(&self, feature_id: Uuid) -> Result<Option<FeatureEntity>>;

    async fn find_by_name(&self, name: String) -> Result<Option<FeatureEntity>>;

    async fn list_by_ids(&self, feature_ids: Vec<Uuid>) -> Result<Vec<FeatureEntity>>;

    async fn insert(&self, insert_feature_entity: InsertFeatureEntity) -> Result<FeatureEntity>;

    async fn set_active(&self, feature_id: Uuid, is_active: bool) -> Result<Option<FeatureEntity>>;
}
