use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::subscriptions::{
            EditSubscriptionEntity, InsertSubscriptionEntity, SubscriptionEntity,
        },
        repositories::subscriptions::SubscriptionRepository,
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct SubscriptionInMemory {
    db: Arc<MemoryDatabase>,
}

impl SubscriptionInMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionInMemory {
    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>> {
        let subscriptions = self.db.subscriptions.read().await;
        Ok(subscriptions.get(&subscription_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>> {
        let subscriptions = self.db.subscriptions.read().await;
        Ok(subscriptions.values().cloned().collect())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SubscriptionEntity>> {
        let subscriptions = self.db.subscriptions.read().await;
        let mut rows: Vec<SubscriptionEntity> = subscriptions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn insert(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity> {
        let mut subscriptions = self.db.subscriptions.write().await;

        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: insert_subscription_entity.user_id,
            plan_id: insert_subscription_entity.plan_id,
            plan_cost: insert_subscription_entity.plan_cost,
            start_date: insert_subscription_entity.start_date,
            end_date: insert_subscription_entity.end_date,
            status: insert_subscription_entity.status,
            version: 1,
            created_at: insert_subscription_entity.created_at,
            updated_at: insert_subscription_entity.updated_at,
        };
        subscriptions.insert(subscription.id, subscription.clone());

        Ok(subscription)
    }

    async fn update_if_version(
        &self,
        subscription_id: Uuid,
        expected_version: i64,
        edit_subscription_entity: EditSubscriptionEntity,
    ) -> Result<Option<SubscriptionEntity>> {
        let mut subscriptions = self.db.subscriptions.write().await;

        let Some(subscription) = subscriptions
            .get_mut(&subscription_id)
            .filter(|s| s.version == expected_version)
        else {
            return Ok(None);
        };

        subscription.status = edit_subscription_entity.status;
        subscription.end_date = edit_subscription_entity.end_date;
        subscription.updated_at = edit_subscription_entity.updated_at;
        subscription.version += 1;

        Ok(Some(subscription.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::enums::subscription_statuses::SubscriptionStatus;
    use chrono::{NaiveDate, Utc};

    fn insert_entity() -> InsertSubscriptionEntity {
        let now = Utc::now();
        InsertSubscriptionEntity {
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            plan_cost: "29.99".parse().unwrap(),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: None,
            status: SubscriptionStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    fn edit(status: SubscriptionStatus) -> EditSubscriptionEntity {
        EditSubscriptionEntity {
            status,
            end_date: None,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn update_applies_when_version_matches_and_bumps_it() {
        let repository = SubscriptionInMemory::new(Arc::new(MemoryDatabase::default()));
        let created = repository.insert(insert_entity()).await.unwrap();

        let updated = repository
            .update_if_version(created.id, 1, edit(SubscriptionStatus::Suspended))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, SubscriptionStatus::Suspended);
        assert_eq!(updated.version, 2);
    }

    #[tokio::test]
    async fn stale_version_leaves_row_untouched() {
        let repository = SubscriptionInMemory::new(Arc::new(MemoryDatabase::default()));
        let created = repository.insert(insert_entity()).await.unwrap();
        repository
            .update_if_version(created.id, 1, edit(SubscriptionStatus::Suspended))
            .await
            .unwrap();

        let stale = repository
            .update_if_version(created.id, 1, edit(SubscriptionStatus::Cancelled))
            .await
            .unwrap();
        assert!(stale.is_none());

        let stored = repository.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SubscriptionStatus::Suspended);
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn missing_row_is_none() {
        let repository = SubscriptionInMemory::new(Arc::new(MemoryDatabase::default()));
        let result = repository
            .update_if_version(Uuid::new_v4(), 1, edit(SubscriptionStatus::Cancelled))
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
