use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    entities::{features::FeatureEntity, plans::PlanEntity},
    value_objects::enums::billing_cycles::BillingCycle,
};

#[derive(Debug, Clone)]
pub struct CreateFeatureModel {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePlanModel {
    pub name: String,
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub description: Option<String>,
    pub feature_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FeatureDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FeatureEntity> for FeatureDto {
    fn from(value: FeatureEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Lightweight row for plan listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanListDto {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
}

impl From<&PlanEntity> for PlanListDto {
    fn from(value: &PlanEntity) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            price: value.price,
            billing_cycle: value.billing_cycle,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanDetailDto {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub description: Option<String>,
    pub is_active: bool,
    pub features: Vec<FeatureDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanDetailDto {
    /// Features not attached to `plan` are ignored; output is sorted by name.
    pub fn project(plan: PlanEntity, features: Vec<FeatureEntity>) -> Self {
        let mut features: Vec<FeatureDto> = features
            .into_iter()
            .filter(|feature| plan.feature_ids.contains(&feature.id))
            .map(FeatureDto::from)
            .collect();
        features.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            id: plan.id,
            name: plan.name,
            price: plan.price,
            billing_cycle: plan.billing_cycle,
            description: plan.description,
            is_active: plan.is_active,
            features,
            created_at: plan.created_at,
            updated_at: plan.updated_at,
        }
    }
}
