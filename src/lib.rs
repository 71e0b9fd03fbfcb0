pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod seed;

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use application::usecases::analytics::AnalyticsUseCase;
use domain::value_objects::analytics::RevenueReportDto;
use infrastructure::memory::{
    memory_database::MemoryDatabase,
    repositories::{subscriptions::SubscriptionInMemory, users::UserInMemory},
};
use seed::data_generator::DataGenerator;

/// Seeds an in-memory store from config and computes the revenue report against it.
pub async fn run(config: &config::config_model::DotEnvyConfig) -> Result<RevenueReportDto> {
    let today = config.report.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let seed = DataGenerator::new(config.generator.seed, today)
        .generate(config.generator.users, config.generator.subscriptions);
    let db = Arc::new(MemoryDatabase::from_seed(seed));

    let counts = db.row_counts().await;
    info!(
        stage = %config.stage,
        seed = config.generator.seed,
        features = counts.features,
        plans = counts.plans,
        users = counts.users,
        subscriptions = counts.subscriptions,
        "Synthetic data has been loaded"
    );

    let analytics_usecase = AnalyticsUseCase::new(
        Arc::new(SubscriptionInMemory::new(Arc::clone(&db))),
        Arc::new(UserInMemory::new(Arc::clone(&db))),
    );

    let report = analytics_usecase.revenue_report_at(today).await?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use config::{
        config_model::{DotEnvyConfig, Generator, Report},
        stage::Stage,
    };

    fn config(seed: u64) -> DotEnvyConfig {
        DotEnvyConfig {
            stage: Stage::Local,
            generator: Generator {
                seed,
                users: 30,
                subscriptions: 400,
            },
            report: Report {
                as_of: NaiveDate::from_ymd_opt(2026, 10, 18),
            },
        }
    }

    #[tokio::test]
    async fn same_config_yields_the_same_report() {
        let first = run(&config(3)).await.unwrap();
        let second = run(&config(3)).await.unwrap();

        assert_eq!(first, second);
        assert!(first.top_users.len() <= 5);
        assert!(first.monthly_revenue_history.len() <= 12);
        assert!(first.top_users.iter().all(|u| !u.username.is_empty()));
    }

    #[tokio::test]
    async fn report_never_contains_the_current_month() {
        let report = run(&config(8)).await.unwrap();
        let current_month = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();

        assert!(
            report
                .monthly_revenue_history
                .iter()
                .all(|m| m.month < current_month)
        );
    }
}
