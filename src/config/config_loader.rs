use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::{
    config_model::{DotEnvyConfig, Generator, Report},
    stage::Stage,
};

const DEFAULT_SEED: u64 = 42;
const DEFAULT_SEED_USERS: usize = 100;
const DEFAULT_SEED_SUBSCRIPTIONS: usize = 2_000;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();
    load_from(|key| std::env::var(key).ok())
}

pub fn load_from<F>(lookup: F) -> Result<DotEnvyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let stage = match non_empty(&lookup, "STAGE") {
        Some(raw) => Stage::try_from(raw.as_str()).context("STAGE is invalid")?,
        None => Stage::default(),
    };

    let generator = Generator {
        seed: parse_or(&lookup, "SEED", DEFAULT_SEED)?,
        users: parse_or(&lookup, "SEED_USERS", DEFAULT_SEED_USERS)?,
        subscriptions: parse_or(&lookup, "SEED_SUBSCRIPTIONS", DEFAULT_SEED_SUBSCRIPTIONS)?,
    };

    let report = Report {
        as_of: non_empty(&lookup, "REPORT_DATE")
            .map(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d"))
            .transpose()
            .context("REPORT_DATE is invalid, expected YYYY-MM-DD")?,
    };

    Ok(DotEnvyConfig {
        stage,
        generator,
        report,
    })
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is invalid")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load_from(lookup(&[])).unwrap();

        assert_eq!(config.stage, Stage::Local);
        assert_eq!(
            config.generator,
            Generator {
                seed: DEFAULT_SEED,
                users: DEFAULT_SEED_USERS,
                subscriptions: DEFAULT_SEED_SUBSCRIPTIONS,
            }
        );
        assert_eq!(config.report.as_of, None);
    }

    #[test]
    fn reads_every_variable() {
        let config = load_from(lookup(&[
            ("STAGE", "production"),
            ("SEED", "7"),
            ("SEED_USERS", "10"),
            ("SEED_SUBSCRIPTIONS", "25"),
            ("REPORT_DATE", "2026-10-18"),
        ]))
        .unwrap();

        assert_eq!(config.stage, Stage::Production);
        assert_eq!(config.generator.seed, 7);
        assert_eq!(config.generator.users, 10);
        assert_eq!(config.generator.subscriptions, 25);
        assert_eq!(config.report.as_of, NaiveDate::from_ymd_opt(2026, 10, 18));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = load_from(lookup(&[("SEED_USERS", "many")])).unwrap_err();
        assert!(err.to_string().contains("SEED_USERS"));

        let err = load_from(lookup(&[("REPORT_DATE", "18/10/2026")])).unwrap_err();
        assert!(err.to_string().contains("REPORT_DATE"));

        let err = load_from(lookup(&[("STAGE", "qa")])).unwrap_err();
        assert!(err.to_string().contains("STAGE"));
    }
}
