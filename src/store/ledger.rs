use chrono::NaiveDate;

use crate::domain::{Month, SpendingRecord, Subscription, TrendPoint};

/// Time-bucketed history of monthly-equivalent spend, at most one record per
/// `(month, year)` period.
#[derive(Debug, Clone, Default)]
pub struct SpendingLedger {
    records: Vec<SpendingRecord>,
}

impl SpendingLedger {
    pub fn new(records: Vec<SpendingRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SpendingRecord] {
        &self.records
    }

    /// Captures the current active spend into the period containing `now`.
    /// A second snapshot in the same period replaces the first, so the stored
    /// value always reflects the latest call, never an accumulation.
    pub fn record_snapshot(&mut self, subscriptions: &[Subscription], now: NaiveDate) {
        let month = Month::from_date(now);
        let year = chrono::Datelike::year(&now);

        let mut by_category = SpendingRecord::empty_categories();
        let mut total_spend = 0.0;
        for sub in subscriptions.iter().filter(|s| s.is_active) {
            let monthly = sub.monthly_equivalent();
            total_spend += monthly;
            if let Some(bucket) = by_category.get_mut(&sub.category) {
                *bucket += monthly;
            }
        }

        let record = SpendingRecord {
            month,
            year,
            total_spend,
            by_category,
        };

        let mut next = self.records.clone();
        match next.iter_mut().find(|r| r.period() == (year, month)) {
            Some(existing) => *existing = record,
            None => next.push(record),
        }
        self.records = next;
    }

    /// All records in chronological order (year, then calendar month),
    /// regardless of how they were inserted, labelled for compact display.
    pub fn trend(&self) -> Vec<TrendPoint> {
        let mut sorted = self.records.clone();
        sorted.sort_by_key(|r| (r.year, r.month));
        sorted
            .into_iter()
            .map(|r| TrendPoint {
                label: format!("{} {}", r.month.abbrev(), r.year),
                amount: r.total_spend,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillingCycle, Category, NewSubscription, SubscriptionPatch};
    use crate::store::SubscriptionStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with(subs: &[(&str, Category, f64, BillingCycle)]) -> SubscriptionStore {
        let mut store = SubscriptionStore::default();
        for (name, category, amount, cycle) in subs {
            store.add(NewSubscription::new(
                *name,
                *category,
                *amount,
                *cycle,
                date(2025, 6, 1),
            ));
        }
        store
    }

    #[test]
    fn snapshot_sums_monthly_equivalents_per_category() {
        let store = store_with(&[
            ("A", Category::Music, 10.0, BillingCycle::Monthly),
            ("B", Category::Music, 120.0, BillingCycle::Yearly),
            ("C", Category::Food, 40.0, BillingCycle::Monthly),
        ]);
        let mut ledger = SpendingLedger::default();
        ledger.record_snapshot(store.list(), date(2025, 6, 15));

        let record = &ledger.records()[0];
        assert_eq!(record.month, Month::June);
        assert_eq!(record.year, 2025);
        assert_eq!(record.total_spend, 60.0);
        assert_eq!(record.by_category[&Category::Music], 20.0);
        assert_eq!(record.by_category[&Category::Food], 40.0);
        assert_eq!(record.by_category[&Category::Shopping], 0.0);
        assert_eq!(record.by_category.len(), 6);
    }

    #[test]
    fn snapshot_skips_inactive_subscriptions() {
        let mut store = store_with(&[("A", Category::Music, 10.0, BillingCycle::Monthly)]);
        let id = store.list()[0].id;
        store.update(
            id,
            &SubscriptionPatch {
                is_active: Some(false),
                ..Default::default()
            },
        );
        let mut ledger = SpendingLedger::default();
        ledger.record_snapshot(store.list(), date(2025, 6, 15));
        assert_eq!(ledger.records()[0].total_spend, 0.0);
    }

    #[test]
    fn second_snapshot_in_same_period_replaces_the_first() {
        let mut store = store_with(&[("A", Category::Music, 10.0, BillingCycle::Monthly)]);
        let mut ledger = SpendingLedger::default();
        ledger.record_snapshot(store.list(), date(2025, 6, 1));
        store.add(NewSubscription::new(
            "B",
            Category::Food,
            5.0,
            BillingCycle::Monthly,
            date(2025, 6, 20),
        ));
        ledger.record_snapshot(store.list(), date(2025, 6, 28));

        assert_eq!(ledger.records().len(), 1);
        assert_eq!(ledger.records()[0].total_spend, 15.0);
    }

    #[test]
    fn trend_is_chronological_regardless_of_insertion_order() {
        let mut ledger = SpendingLedger::default();
        let store = store_with(&[("A", Category::Music, 10.0, BillingCycle::Monthly)]);
        ledger.record_snapshot(store.list(), date(2025, 3, 10));
        ledger.record_snapshot(store.list(), date(2025, 1, 10));
        ledger.record_snapshot(store.list(), date(2024, 12, 10));

        let labels: Vec<_> = ledger.trend().into_iter().map(|p| p.label).collect();
        assert_eq!(labels, ["Dec 2024", "Jan 2025", "Mar 2025"]);
    }
}
