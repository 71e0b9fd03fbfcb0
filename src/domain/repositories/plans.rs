use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::plans::{InsertPlanEntity, PlanEntity};

#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>>;

    async fn find_by_name(&self, name: String) -> Result<Option<PlanEntity>>;

    async fn list_plans(&self) -> Result<Vec<PlanEntity>>;

    async fn insert(&self, insert_plan_entity: InsertPlanEntity) -> Result<PlanEntity>;

    async fn update_price(&self, plan_id: Uuid, price: Decimal) -> Result<Option<PlanEntity>>;

    async fn set_active(&self, plan_id: Uuid, is_active: bool) -> Result<Option<PlanEntity>>;
}
