use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::billing_cycles::BillingCycle;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanEntity {
    pub id: Uuid,
    pub name: String,
    /// Current list price. Existing subscriptions keep their own `plan_cost`.
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub description: Option<String>,
    pub is_active: bool,
    pub feature_ids: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlanEntity {
    pub name: String,
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub description: Option<String>,
    pub is_active: bool,
    pub feature_ids: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
