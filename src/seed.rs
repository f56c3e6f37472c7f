//! First-run seed data. Used when a persisted blob is absent so a fresh
//! session starts with something to look at.

use chrono::{Duration, NaiveDate};

use crate::domain::{
    BillingCycle, Category, Month, NewSubscription, SpendingRecord, Subscription, SubscriptionId,
};

/// Demo subscriptions with renewal dates offset from `now`.
pub fn seed_subscriptions(now: NaiveDate) -> Vec<Subscription> {
    let entries: [(&str, Category, f64, i64); 8] = [
        ("Netflix", Category::Entertainment, 17.99, 5),
        ("Spotify", Category::Music, 12.99, 12),
        ("Amazon Prime", Category::Entertainment, 9.99, 1),
        ("Adobe Creative Cloud", Category::Productivity, 20.99, 18),
        ("HelloFresh", Category::Food, 79.96, 7),
        ("Apple Music", Category::Music, 10.99, 15),
        ("Amazon Shopping", Category::Shopping, 24.38, 22),
        ("Fitness Gym", Category::HealthAndFitness, 89.15, 3),
    ];

    entries
        .into_iter()
        .map(|(name, category, amount, offset)| {
            NewSubscription::new(
                name,
                category,
                amount,
                BillingCycle::Monthly,
                now + Duration::days(offset),
            )
            .into_subscription(SubscriptionId::generate())
        })
        .collect()
}

/// Five months of demo history for the trend view.
pub fn seed_spending_history() -> Vec<SpendingRecord> {
    let months: [(Month, f64, [f64; 6]); 5] = [
        (
            Month::January,
            150.99,
            [30.99, 20.99, 40.50, 20.99, 20.99, 16.53],
        ),
        (
            Month::February,
            168.45,
            [39.99, 20.99, 40.50, 29.99, 20.99, 15.99],
        ),
        (
            Month::March,
            175.67,
            [39.99, 24.99, 40.50, 29.99, 24.99, 15.21],
        ),
        (
            Month::April,
            192.50,
            [49.99, 24.99, 42.50, 29.99, 29.99, 15.04],
        ),
        (
            Month::May,
            195.38,
            [49.99, 24.99, 42.50, 29.99, 33.12, 14.79],
        ),
    ];

    months
        .into_iter()
        .map(|(month, total_spend, amounts)| {
            // Amounts follow the canonical category order.
            let by_category = Category::ALL.iter().copied().zip(amounts).collect();
            SpendingRecord {
                month,
                year: 2025,
                total_spend,
                by_category,
            }
        })
        .collect()
}
