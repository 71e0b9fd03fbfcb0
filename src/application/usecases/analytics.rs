use std::{collections::HashMap, sync::Arc};

use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    analytics::revenue,
    errors::{EngineError, EngineResult},
    repositories::{subscriptions::SubscriptionRepository, users::UserRepository},
    value_objects::analytics::{RevenueReportDto, TopUserDto},
};

pub struct AnalyticsUseCase<S, U>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    user_repo: Arc<U>,
}

impl<S, U> AnalyticsUseCase<S, U>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(subscription_repo: Arc<S>, user_repo: Arc<U>) -> Self {
        Self {
            subscription_repo,
            user_repo,
        }
    }

    pub async fn revenue_report(&self) -> EngineResult<RevenueReportDto> {
        self.revenue_report_at(Utc::now().date_naive()).await
    }

    /// Builds the report as seen on `today`. Read-only; safe to call concurrently.
    pub async fn revenue_report_at(&self, today: NaiveDate) -> EngineResult<RevenueReportDto> {
        let subscriptions = self.subscription_repo.list_all().await.map_err(|err| {
            error!(db_error = ?err, "analytics: failed to load subscriptions");
            EngineError::Internal(err)
        })?;

        let summary = revenue::aggregate(&subscriptions, today);

        let ranked_ids: Vec<Uuid> = summary.top_spenders.iter().map(|s| s.user_id).collect();
        let users: HashMap<Uuid, _> = if ranked_ids.is_empty() {
            HashMap::new()
        } else {
            self.user_repo
                .list_by_ids(ranked_ids)
                .await
                .map_err(|err| {
                    error!(db_error = ?err, "analytics: failed to load top users");
                    EngineError::Internal(err)
                })?
                .into_iter()
                .map(|user| (user.id, user))
                .collect()
        };

        let top_users = summary
            .top_spenders
            .into_iter()
            .map(|spend| {
                let (username, email) = match users.get(&spend.user_id) {
                    Some(user) => (user.username.clone(), user.email.clone()),
                    None => {
                        warn!(user_id = %spend.user_id, "analytics: ranked user missing from user store");
                        (String::new(), String::new())
                    }
                };
                TopUserDto {
                    user_id: spend.user_id,
                    username,
                    email,
                    total_subscription_value: spend.total_subscription_value,
                }
            })
            .collect();

        info!(
            %today,
            subscription_count = subscriptions.len(),
            total_recurring_revenue = %summary.total_recurring_revenue,
            months = summary.monthly_revenue_history.len(),
            "analytics: revenue report computed"
        );

        Ok(RevenueReportDto {
            total_recurring_revenue: summary.total_recurring_revenue,
            average_subscription_cost: summary.average_subscription_cost,
            monthly_revenue_history: summary.monthly_revenue_history,
            top_users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{subscriptions::SubscriptionEntity, users::UserEntity},
        repositories::{subscriptions::MockSubscriptionRepository, users::MockUserRepository},
        value_objects::enums::subscription_statuses::SubscriptionStatus,
    };
    use rust_decimal::Decimal;

    fn money(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn user(id: Uuid, username: &str) -> UserEntity {
        UserEntity {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: None,
            last_name: None,
            created_at: Utc::now(),
        }
    }

    fn subscription(
        user_id: Uuid,
        cost: &str,
        status: SubscriptionStatus,
        start_date: NaiveDate,
    ) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id,
            plan_id: Uuid::new_v4(),
            plan_cost: money(cost),
            start_date,
            end_date: None,
            status,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn empty_population_returns_zeroed_report_without_user_lookup() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut user_repo = MockUserRepository::new();
        subscription_repo
            .expect_list_all()
            .returning(|| Box::pin(async { Ok(vec![]) }));
        user_repo.expect_list_by_ids().never();

        let usecase = AnalyticsUseCase::new(Arc::new(subscription_repo), Arc::new(user_repo));

        let report = usecase.revenue_report_at(today()).await.unwrap();

        assert_eq!(report.total_recurring_revenue, Decimal::ZERO);
        assert_eq!(report.average_subscription_cost, Decimal::ZERO);
        assert!(report.monthly_revenue_history.is_empty());
        assert!(report.top_users.is_empty());
    }

    #[tokio::test]
    async fn report_joins_identities_and_ranks_highest_spender_first() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let this_month = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        let last_month = NaiveDate::from_ymd_opt(2026, 9, 12).unwrap();
        let subscriptions = vec![
            subscription(a, "500", SubscriptionStatus::Active, last_month),
            subscription(b, "400", SubscriptionStatus::Cancelled, last_month),
            subscription(b, "300", SubscriptionStatus::Active, this_month),
        ];

        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut user_repo = MockUserRepository::new();
        subscription_repo.expect_list_all().returning(move || {
            let subscriptions = subscriptions.clone();
            Box::pin(async move { Ok(subscriptions) })
        });
        user_repo
            .expect_list_by_ids()
            .withf(move |ids| ids == &vec![b, a])
            .returning(move |_| Box::pin(async move { Ok(vec![user(a, "alice"), user(b, "bob")]) }));

        let usecase = AnalyticsUseCase::new(Arc::new(subscription_repo), Arc::new(user_repo));

        let report = usecase.revenue_report_at(today()).await.unwrap();

        assert_eq!(report.total_recurring_revenue, money("800"));
        assert_eq!(report.average_subscription_cost, money("400"));
        assert_eq!(report.monthly_revenue_history.len(), 1);
        assert_eq!(report.monthly_revenue_history[0].total_revenue, money("900"));

        let names: Vec<&str> = report.top_users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice"]);
        assert_eq!(report.top_users[0].email, "bob@example.com");
        assert_eq!(report.top_users[0].total_subscription_value, money("700"));
    }

    #[tokio::test]
    async fn unknown_ranked_user_keeps_its_place_with_blank_identity() {
        let ghost = Uuid::new_v4();
        let start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let subscriptions = vec![subscription(ghost, "10", SubscriptionStatus::Active, start)];

        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut user_repo = MockUserRepository::new();
        subscription_repo.expect_list_all().returning(move || {
            let subscriptions = subscriptions.clone();
            Box::pin(async move { Ok(subscriptions) })
        });
        user_repo
            .expect_list_by_ids()
            .returning(|_| Box::pin(async { Ok(vec![]) }));

        let usecase = AnalyticsUseCase::new(Arc::new(subscription_repo), Arc::new(user_repo));

        let report = usecase.revenue_report_at(today()).await.unwrap();

        assert_eq!(report.top_users.len(), 1);
        assert_eq!(report.top_users[0].user_id, ghost);
        assert!(report.top_users[0].username.is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_surfaced_unmodified() {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_list_all()
            .returning(|| Box::pin(async { Err(anyhow::anyhow!("statement timeout")) }));

        let usecase =
            AnalyticsUseCase::new(Arc::new(subscription_repo), Arc::new(MockUserRepository::new()));

        let result = usecase.revenue_report_at(today()).await;

        assert!(matches!(result, Err(EngineError::Internal(err)) if err.to_string() == "statement timeout"));
    }

    #[tokio::test]
    async fn report_serializes_amounts_as_numbers() {
        let a = Uuid::new_v4();
        let start = NaiveDate::from_ymd_opt(2026, 4, 9).unwrap();
        let subscriptions = vec![subscription(a, "12.50", SubscriptionStatus::Active, start)];

        let mut subscription_repo = MockSubscriptionRepository::new();
        let mut user_repo = MockUserRepository::new();
        subscription_repo.expect_list_all().returning(move || {
            let subscriptions = subscriptions.clone();
            Box::pin(async move { Ok(subscriptions) })
        });
        user_repo
            .expect_list_by_ids()
            .returning(move |_| Box::pin(async move { Ok(vec![user(a, "alice")]) }));

        let usecase = AnalyticsUseCase::new(Arc::new(subscription_repo), Arc::new(user_repo));
        let report = usecase.revenue_report_at(today()).await.unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_recurring_revenue"], serde_json::json!(12.5));
        assert_eq!(json["monthly_revenue_history"][0]["month"], serde_json::json!("2026-04-01"));
        assert_eq!(json["top_users"][0]["username"], serde_json::json!("alice"));
        assert_eq!(
            json["top_users"][0]["total_subscription_value"],
            serde_json::json!(12.5)
        );
    }
}
