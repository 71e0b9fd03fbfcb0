//! Seedable synthetic data for demos and tests.
//!
//! A generator owns its RNG; nothing is shared between instances, so the same
//! seed and `today` always produce the same records.

use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    entities::{
        features::FeatureEntity, plans::PlanEntity, subscriptions::SubscriptionEntity,
        users::UserEntity,
    },
    value_objects::enums::{
        billing_cycles::BillingCycle, subscription_statuses::SubscriptionStatus,
    },
};

const FEATURES: [(&str, &str); 10] = [
    ("SMS Notifications", "Receive SMS notifications for important updates"),
    ("Priority Support", "24/7 priority customer support"),
    ("Advanced Analytics", "Access to advanced analytics dashboard"),
    ("API Access", "Full API access for integrations"),
    ("Custom Branding", "Add your own branding and logo"),
    ("Multi-User Access", "Allow multiple users on one account"),
    ("Data Export", "Export your data in various formats"),
    ("Unlimited Storage", "Unlimited cloud storage"),
    ("Advanced Security", "Enhanced security features"),
    ("White Label", "Complete white label solution"),
];

/// (name, price in cents, cycle, number of leading features included)
const PLANS: [(&str, i64, BillingCycle, usize); 6] = [
    ("Basic Monthly", 999, BillingCycle::Monthly, 2),
    ("Pro Monthly", 2999, BillingCycle::Monthly, 5),
    ("Enterprise Monthly", 9999, BillingCycle::Monthly, 10),
    ("Basic Yearly", 9999, BillingCycle::Yearly, 2),
    ("Pro Yearly", 29999, BillingCycle::Yearly, 5),
    ("Enterprise Yearly", 99999, BillingCycle::Yearly, 10),
];

const FIRST_NAMES: [&str; 12] = [
    "Ada", "Bruno", "Chloe", "Dmitri", "Elif", "Farah", "Goran", "Hana", "Ivo", "Jun", "Kemal",
    "Lina",
];

const LAST_NAMES: [&str; 10] = [
    "Okafor", "Lindqvist", "Moreau", "Tanaka", "Novak", "Haddad", "Silva", "Kowalski", "Brennan",
    "Ito",
];

const START_SPREAD_DAYS: u64 = 730;
const MIN_DURATION_DAYS: u64 = 30;
const MAX_DURATION_DAYS: u64 = 730;
/// Cost jitter around the plan price, in cents: [-5.00, +20.00).
const COST_JITTER_CENTS: std::ops::Range<i64> = -500..2000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub features: Vec<FeatureEntity>,
    pub plans: Vec<PlanEntity>,
    pub users: Vec<UserEntity>,
    pub subscriptions: Vec<SubscriptionEntity>,
}

pub struct DataGenerator {
    rng: StdRng,
    today: NaiveDate,
}

impl DataGenerator {
    pub fn new(seed: u64, today: NaiveDate) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            today,
        }
    }

    pub fn generate(mut self, user_count: usize, subscription_count: usize) -> SeedData {
        let features = self.features();
        let plans = self.plans(&features);
        let users = self.users(user_count);
        let subscriptions = self.subscriptions(&users, &plans, subscription_count);

        SeedData {
            features,
            plans,
            users,
            subscriptions,
        }
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.today.and_time(NaiveTime::MIN).and_utc()
    }

    fn next_id(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    fn features(&mut self) -> Vec<FeatureEntity> {
        let now = self.timestamp();
        FEATURES
            .iter()
            .map(|(name, description)| FeatureEntity {
                id: self.next_id(),
                name: name.to_string(),
                description: Some(description.to_string()),
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .collect()
    }

    fn plans(&mut self, features: &[FeatureEntity]) -> Vec<PlanEntity> {
        let now = self.timestamp();
        PLANS
            .iter()
            .map(|(name, price_cents, billing_cycle, feature_count)| PlanEntity {
                id: self.next_id(),
                name: name.to_string(),
                price: Decimal::new(*price_cents, 2),
                billing_cycle: *billing_cycle,
                description: None,
                is_active: true,
                feature_ids: features
                    .iter()
                    .take(*feature_count)
                    .map(|feature| feature.id)
                    .collect::<BTreeSet<_>>(),
                created_at: now,
                updated_at: now,
            })
            .collect()
    }

    fn users(&mut self, count: usize) -> Vec<UserEntity> {
        let now = self.timestamp();
        (0..count)
            .map(|i| {
                let first_name = FIRST_NAMES[self.rng.gen_range(0..FIRST_NAMES.len())];
                let last_name = LAST_NAMES[self.rng.gen_range(0..LAST_NAMES.len())];
                UserEntity {
                    id: self.next_id(),
                    username: format!(
                        "user{i}_{}{}",
                        first_name.to_ascii_lowercase(),
                        last_name.to_ascii_lowercase()
                    ),
                    email: format!("user{i}@example.com"),
                    first_name: Some(first_name.to_string()),
                    last_name: Some(last_name.to_string()),
                    created_at: now,
                }
            })
            .collect()
    }

    fn subscriptions(
        &mut self,
        users: &[UserEntity],
        plans: &[PlanEntity],
        count: usize,
    ) -> Vec<SubscriptionEntity> {
        if users.is_empty() || plans.is_empty() {
            return Vec::new();
        }

        let now = self.timestamp();
        (0..count)
            .map(|_| {
                let user = &users[self.rng.gen_range(0..users.len())];
                let plan = &plans[self.rng.gen_range(0..plans.len())];

                let start_date = self.today - Days::new(self.rng.gen_range(0..=START_SPREAD_DAYS));
                let end_date = start_date
                    + Days::new(self.rng.gen_range(MIN_DURATION_DAYS..=MAX_DURATION_DAYS));

                let jitter = Decimal::new(self.rng.gen_range(COST_JITTER_CENTS), 2);
                let plan_cost = (plan.price + jitter).max(Decimal::ZERO);

                SubscriptionEntity {
                    id: self.next_id(),
                    user_id: user.id,
                    plan_id: plan.id,
                    plan_cost,
                    start_date,
                    end_date: Some(end_date),
                    status: self.status(),
                    version: 1,
                    created_at: now,
                    updated_at: now,
                }
            })
            .collect()
    }

    /// 70% active, 20% cancelled, 10% suspended.
    fn status(&mut self) -> SubscriptionStatus {
        match self.rng.gen_range(0..100u8) {
            0..70 => SubscriptionStatus::Active,
            70..90 => SubscriptionStatus::Cancelled,
            _ => SubscriptionStatus::Suspended,
        }
    }
}
