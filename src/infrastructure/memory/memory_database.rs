use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::entities::{
        features::FeatureEntity, plans::PlanEntity, subscriptions::SubscriptionEntity,
        users::UserEntity,
    },
    seed::data_generator::SeedData,
};

/// Process-local tables shared by the in-memory repositories.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    pub(crate) features: RwLock<HashMap<Uuid, FeatureEntity>>,
    pub(crate) plans: RwLock<HashMap<Uuid, PlanEntity>>,
    pub(crate) users: RwLock<HashMap<Uuid, UserEntity>>,
    pub(crate) subscriptions: RwLock<HashMap<Uuid, SubscriptionEntity>>,
}

impl MemoryDatabase {
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            features: RwLock::new(
                seed.features
                    .into_iter()
                    .map(|f| (f.id, f))
                    .collect::<HashMap<_, _>>(),
            ),
            plans: RwLock::new(
                seed.plans
                    .into_iter()
                    .map(|p| (p.id, p))
                    .collect::<HashMap<_, _>>(),
            ),
            users: RwLock::new(
                seed.users
                    .into_iter()
                    .map(|u| (u.id, u))
                    .collect::<HashMap<_, _>>(),
            ),
            subscriptions: RwLock::new(
                seed.subscriptions
                    .into_iter()
                    .map(|s| (s.id, s))
                    .collect::<HashMap<_, _>>(),
            ),
        }
    }

    pub async fn row_counts(&self) -> RowCounts {
        RowCounts {
            features: self.features.read().await.len(),
            plans: self.plans.read().await.len(),
            users: self.users.read().await.len(),
            subscriptions: self.subscriptions.read().await.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub features: usize,
    pub plans: usize,
    pub users: usize,
    pub subscriptions: usize,
}
