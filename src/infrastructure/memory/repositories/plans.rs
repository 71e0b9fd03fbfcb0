use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::plans::{InsertPlanEntity, PlanEntity},
        repositories::plans::PlanRepository,
    },
    infrastructure::memory::memory_database::MemoryDatabase,
};

pub struct PlanInMemory {
    db: Arc<MemoryDatabase>,
}

impl PlanInMemory {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlanRepository for PlanInMemory {
    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>> {
        let plans = self.db.plans.read().await;
        Ok(plans.get(&plan_id).cloned())
    }

    async fn find_by_name(&self, name: String) -> Result<Option<PlanEntity>> {
        let plans = self.db.plans.read().await;
        Ok(plans.values().find(|p| p.name == name).cloned())
    }

    async fn list_plans(&self) -> Result<Vec<PlanEntity>> {
        let plans = self.db.plans.read().await;
        let mut rows: Vec<PlanEntity> = plans.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert(&self, insert_plan_entity: InsertPlanEntity) -> Result<PlanEntity> {
        let mut plans = self.db.plans.write().await;

        if plans.values().any(|p| p.name == insert_plan_entity.name) {
            bail!(
                "unique constraint violated: plans.name = {}",
                insert_plan_entity.name
            );
        }

        let plan = PlanEntity {
            id: Uuid::new_v4(),
            name: insert_plan_entity.name,
            price: insert_plan_entity.price,
            billing_cycle: insert_plan_entity.billing_cycle,
            description: insert_plan_entity.description,
            is_active: insert_plan_entity.is_active,
            feature_ids: insert_plan_entity.feature_ids,
            created_at: insert_plan_entity.created_at,
            updated_at: insert_plan_entity.updated_at,
        };
        plans.insert(plan.id, plan.clone());

        Ok(plan)
    }

    async fn update_price(&self, plan_id: Uuid, price: Decimal) -> Result<Option<PlanEntity>> {
        let mut plans = self.db.plans.write().await;

        Ok(plans.get_mut(&plan_id).map(|plan| {
            plan.price = price;
            plan.updated_at = Utc::now();
            plan.clone()
        }))
    }

    async fn set_active(&self, plan_id: Uuid, is_active: bool) -> Result<Option<PlanEntity>> {
        let mut plans = self.db.plans.write().await;

        Ok(plans.get_mut(&plan_id).map(|plan| {
            plan.is_active = is_active;
            plan.updated_at = Utc::now();
            plan.clone()
        }))
    }
}
