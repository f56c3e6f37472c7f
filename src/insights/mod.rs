//! Pure derivations over subscription slices. Every temporal function takes
//! `now` explicitly; nothing here reads the wall clock or holds state.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::domain::{Category, Subscription};

/// Default forward-looking window for surfacing soon-due renewals.
pub const DEFAULT_RENEWAL_WINDOW_DAYS: i64 = 30;

/// Sum of monthly-equivalent cost over active subscriptions only.
pub fn total_monthly_spend(subscriptions: &[Subscription]) -> f64 {
    subscriptions
        .iter()
        .filter(|s| s.is_active)
        .map(|s| s.monthly_equivalent())
        .sum()
}

/// Active subscriptions renewing in `[now, now + window_days]` inclusive,
/// ascending by renewal date. The sort is stable, so ties keep store order.
pub fn upcoming_renewals(
    subscriptions: &[Subscription],
    now: NaiveDate,
    window_days: i64,
) -> Vec<Subscription> {
    let cutoff = now + Duration::days(window_days);
    let mut due: Vec<Subscription> = subscriptions
        .iter()
        .filter(|s| s.is_active && s.renewal_date >= now && s.renewal_date <= cutoff)
        .cloned()
        .collect();
    due.sort_by_key(|s| s.renewal_date);
    due
}

/// Partitions active subscriptions into buckets keyed by the full category
/// set. Every category key is present even when its bucket is empty, and
/// store order is preserved within each bucket.
pub fn subscriptions_by_category(
    subscriptions: &[Subscription],
) -> BTreeMap<Category, Vec<Subscription>> {
    let mut buckets: BTreeMap<Category, Vec<Subscription>> =
        Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
    for sub in subscriptions.iter().filter(|s| s.is_active) {
        if let Some(bucket) = buckets.get_mut(&sub.category) {
            bucket.push(sub.clone());
        }
    }
    buckets
}

/// Active trials whose end date has not passed, ascending by end date.
pub fn trial_subscriptions(subscriptions: &[Subscription], now: NaiveDate) -> Vec<Subscription> {
    let mut trials: Vec<Subscription> = subscriptions
        .iter()
        .filter(|s| s.is_active)
        .filter(|s| matches!(s.kind.trial_end_date(), Some(end) if end >= now))
        .cloned()
        .collect();
    trials.sort_by_key(|s| s.kind.trial_end_date());
    trials
}

/// Signed whole days from `now` to `end`. Zero or negative for trials ending
/// today or already past; clamping and labelling belong to the display layer.
pub fn days_remaining(now: NaiveDate, end: NaiveDate) -> i64 {
    (end - now).num_days()
}
