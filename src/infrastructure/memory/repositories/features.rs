use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::features::{FeatureEntity, InsertFeatureEntity},
        repositories::features::FeatureRepository,
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct FeatureInMemory {
    db: Arc<MemoryDatabase>,
}

impl FeatureInMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FeatureRepository for FeatureInMemory {
    async fn find_by_id(&self, feature_id: Uuid) -> Result<Option<FeatureEntity>> {
        let features = self.db.features.read().await;
        Ok(features.get(&feature_id).cloned())
    }

    async fn find_by_name(&self, name: String) -> Result<Option<FeatureEntity>> {
        let features = self.db.features.read().await;
        Ok(features.values().find(|f| f.name == name).cloned())
    }

    async fn list_by_ids(&self, feature_ids: Vec<Uuid>) -> Result<Vec<FeatureEntity>> {
        let features = self.db.features.read().await;
        Ok(feature_ids
            .iter()
            .filter_map(|id| features.get(id).cloned())
            .collect())
    }

    async fn insert(&self, insert_feature_entity: InsertFeatureEntity) -> Result<FeatureEntity> {
        let mut features = self.db.features.write().await;

        if features
            .values()
            .any(|f| f.name == insert_feature_entity.name)
        {
            bail!(
                "unique constraint violated: features.name = {}",
                insert_feature_entity.name
            );
        }

        let feature = FeatureEntity {
            id: Uuid::new_v4(),
            name: insert_feature_entity.name,
            description: insert_feature_entity.description,
            is_active: insert_feature_entity.is_active,
            created_at: insert_feature_entity.created_at,
            updated_at: insert_feature_entity.updated_at,
        };
        features.insert(feature.id, feature.clone());

        Ok(feature)
    }

    async fn set_active(&self, feature_id: Uuid, is_active: bool) -> Result<Option<FeatureEntity>> {
        let mut features = self.db.features.write().await;

        Ok(features.get_mut(&feature_id).map(|feature| {
            feature.is_active = is_active;
            feature.updated_at = Utc::now();
            feature.clone()
        }))
    }
}
