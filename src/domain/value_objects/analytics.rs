use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Revenue earned by subscriptions that started in `month` (first day of the month).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyRevenue {
    pub month: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSpend {
    pub user_id: Uuid,
    pub total_subscription_value: Decimal,
}

/// Output of the pure aggregation, before user identities are joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueSummary {
    pub total_recurring_revenue: Decimal,
    pub average_subscription_cost: Decimal,
    pub monthly_revenue_history: Vec<MonthlyRevenue>,
    pub top_spenders: Vec<UserSpend>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopUserDto {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_subscription_value: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueReportDto {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_recurring_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_subscription_cost: Decimal,
    pub monthly_revenue_history: Vec<MonthlyRevenue>,
    pub top_users: Vec<TopUserDto>,
}
