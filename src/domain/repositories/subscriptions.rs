use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::subscriptions::{
    EditSubscriptionEntity, InsertSubscriptionEntity, SubscriptionEntity,
};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    /// Full population snapshot, used by analytics.
    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<SubscriptionEntity>>;

    async fn insert(
        &self,
        insert_subscription_entity: InsertSubscriptionEntity,
    ) -> Result<SubscriptionEntity>;

    /// Applies `edit` only if the stored version still equals `expected_version`.
    /// Returns `None` when the row is missing or the version moved on.
    async fn update_if_version(
        &self,
        subscription_id: Uuid,
        expected_version: i64,
        edit_subscription_entity: EditSubscriptionEntity,
    ) -> Result<Option<SubscriptionEntity>>;
}
