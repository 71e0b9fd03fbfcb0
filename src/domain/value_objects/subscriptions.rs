use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    entities::{plans::PlanEntity, subscriptions::SubscriptionEntity, users::UserEntity},
    value_objects::{catalog::PlanDetailDto, enums::subscription_statuses::SubscriptionStatus},
};

#[derive(Debug, Clone)]
pub struct CreateSubscriptionModel {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<UserEntity> for UserDto {
    fn from(value: UserEntity) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

/// Lightweight row for subscription listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriptionListDto {
    pub id: Uuid,
    pub user_username: String,
    pub plan_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub plan_cost: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
}

impl SubscriptionListDto {
    pub fn project(subscription: &SubscriptionEntity, user: &UserEntity, plan: &PlanEntity) -> Self {
        Self {
            id: subscription.id,
            user_username: user.username.clone(),
            plan_name: plan.name.clone(),
            plan_cost: subscription.plan_cost,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            status: subscription.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriptionDetailDto {
    pub id: Uuid,
    pub user: UserDto,
    pub plan: PlanDetailDto,
    #[serde(with = "rust_decimal::serde::float")]
    pub plan_cost: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionDetailDto {
    pub fn project(subscription: SubscriptionEntity, user: UserEntity, plan: PlanDetailDto) -> Self {
        Self {
            id: subscription.id,
            user: UserDto::from(user),
            plan,
            plan_cost: subscription.plan_cost,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            status: subscription.status,
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
        }
    }
}
