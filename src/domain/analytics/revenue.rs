//! Revenue aggregation over a snapshot of the subscription population.
//!
//! Everything here is a pure function of its inputs: no storage access, no
//! clock reads. Callers pass `today` explicitly.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::SubscriptionEntity,
    value_objects::{
        analytics::{MonthlyRevenue, RevenueSummary, UserSpend},
        money::round_cents,
    },
};

pub const TOP_USERS_LIMIT: usize = 5;
pub const HISTORY_MONTHS: u32 = 12;

pub fn aggregate(subscriptions: &[SubscriptionEntity], today: NaiveDate) -> RevenueSummary {
    RevenueSummary {
        total_recurring_revenue: total_recurring_revenue(subscriptions),
        average_subscription_cost: average_subscription_cost(subscriptions),
        monthly_revenue_history: monthly_revenue_history(subscriptions, today),
        top_spenders: top_spenders(subscriptions, TOP_USERS_LIMIT),
    }
}

/// Sum of `plan_cost` over subscriptions whose status is active.
pub fn total_recurring_revenue(subscriptions: &[SubscriptionEntity]) -> Decimal {
    subscriptions
        .iter()
        .filter(|subscription| subscription.is_active())
        .map(|subscription| subscription.plan_cost)
        .sum()
}

/// Mean `plan_cost` over every subscription regardless of status, rounded to cents.
pub fn average_subscription_cost(subscriptions: &[SubscriptionEntity]) -> Decimal {
    if subscriptions.is_empty() {
        return Decimal::ZERO;
    }

    let total: Decimal = subscriptions.iter().map(|s| s.plan_cost).sum();
    round_cents(total / Decimal::from(subscriptions.len()))
}

/// Half-open `[today - 12 months, first day of current month)`.
pub fn history_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_months(Months::new(HISTORY_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    (start, first_of_month(today))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Revenue bucketed by the month of `start_date`, ascending, empty months omitted.
pub fn monthly_revenue_history(
    subscriptions: &[SubscriptionEntity],
    today: NaiveDate,
) -> Vec<MonthlyRevenue> {
    let (window_start, window_end) = history_window(today);

    let mut buckets: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for subscription in subscriptions
        .iter()
        .filter(|s| s.start_date >= window_start && s.start_date < window_end)
    {
        *buckets
            .entry(first_of_month(subscription.start_date))
            .or_insert(Decimal::ZERO) += subscription.plan_cost;
    }

    buckets
        .into_iter()
        .map(|(month, total_revenue)| MonthlyRevenue {
            month,
            total_revenue,
        })
        .collect()
}

/// Users ranked by lifetime `plan_cost`, highest first; ties go to the lower user id.
pub fn top_spenders(subscriptions: &[SubscriptionEntity], limit: usize) -> Vec<UserSpend> {
    let mut totals: HashMap<Uuid, Decimal> = HashMap::new();
    for subscription in subscriptions {
        *totals
            .entry(subscription.user_id)
            .or_insert(Decimal::ZERO) += subscription.plan_cost;
    }

    let mut ranked: Vec<UserSpend> = totals
        .into_iter()
        .map(|(user_id, total_subscription_value)| UserSpend {
            user_id,
            total_subscription_value,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_subscription_value
            .cmp(&a.total_subscription_value)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    ranked.truncate(limit);
    ranked
}
