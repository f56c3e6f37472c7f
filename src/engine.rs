use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{
    Category, NewSubscription, Preferences, PreferencesPatch, SpendingRecord, Subscription,
    SubscriptionId, SubscriptionPatch, TrendPoint,
};
use crate::errors::EngineError;
use crate::insights;
use crate::seed;
use crate::storage::{StateSnapshot, StorageBackend};
use crate::store::{
    PreferenceStore, RemoveOutcome, SpendingLedger, SubscriptionStore, UpdateOutcome,
};

pub type EngineResult<T> = Result<T, EngineError>;

/// Facade composing the entity store, preference store, spending ledger, and
/// persistence boundary into one API surface for the presentation layer.
///
/// One instance owns the in-memory state for a session; construct it at
/// session start and pass it to consumers. Every mutation is followed
/// synchronously by a full write-through save of all three blobs.
pub struct SubscriptionEngine {
    subscriptions: SubscriptionStore,
    preferences: PreferenceStore,
    ledger: SpendingLedger,
    storage: Box<dyn StorageBackend>,
}

impl SubscriptionEngine {
    /// Loads persisted state, falling back per blob to the built-in seeds
    /// when a blob is absent or unreadable. `now` anchors the seed renewal
    /// dates.
    pub fn open(storage: Box<dyn StorageBackend>, now: NaiveDate) -> EngineResult<Self> {
        let report = storage.load()?;
        for warning in &report.warnings {
            tracing::warn!("load degraded: {warning}");
        }
        let subscriptions = report
            .subscriptions
            .unwrap_or_else(|| seed::seed_subscriptions(now));
        let user = report.user.unwrap_or_default();
        let history = report
            .spending_history
            .unwrap_or_else(seed::seed_spending_history);

        Ok(Self {
            subscriptions: SubscriptionStore::new(subscriptions),
            preferences: PreferenceStore::new(user),
            ledger: SpendingLedger::new(history),
            storage,
        })
    }

    fn persist(&self) -> EngineResult<()> {
        self.storage.save(&StateSnapshot {
            subscriptions: self.subscriptions.list(),
            user: self.preferences.get(),
            spending_history: self.ledger.records(),
        })
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        self.subscriptions.list()
    }

    pub fn user(&self) -> &Preferences {
        self.preferences.get()
    }

    pub fn spending_history(&self) -> &[SpendingRecord] {
        self.ledger.records()
    }

    /// Creates a subscription. The amount invariant is enforced here, at the
    /// facade boundary; the store never rejects a well-typed write.
    pub fn add_subscription(&mut self, new: NewSubscription) -> EngineResult<Subscription> {
        if new.amount <= 0.0 {
            return Err(EngineError::Invalid(format!(
                "subscription amount must be positive, got {}",
                new.amount
            )));
        }
        let subscription = self.subscriptions.add(new);
        self.persist()?;
        Ok(subscription)
    }

    /// Merges the patch into the matching record. The amount invariant holds
    /// on this path too: a patched amount must stay positive.
    pub fn update_subscription(
        &mut self,
        id: SubscriptionId,
        patch: &SubscriptionPatch,
    ) -> EngineResult<UpdateOutcome> {
        if let Some(amount) = patch.amount {
            if amount <= 0.0 {
                return Err(EngineError::Invalid(format!(
                    "subscription amount must be positive, got {amount}"
                )));
            }
        }
        let outcome = self.subscriptions.update(id, patch);
        if outcome == UpdateOutcome::Updated {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Hard removal: the record is deleted from the store.
    pub fn delete_subscription(&mut self, id: SubscriptionId) -> EngineResult<RemoveOutcome> {
        let outcome = self.subscriptions.remove(id);
        if outcome == RemoveOutcome::Removed {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Soft removal: the record stays listed but stops contributing to any
    /// active-only derivation. Cancel workflows (including trial
    /// cancellation) use this path rather than `delete_subscription`.
    pub fn cancel_subscription(&mut self, id: SubscriptionId) -> EngineResult<UpdateOutcome> {
        self.update_subscription(
            id,
            &SubscriptionPatch {
                is_active: Some(false),
                ..Default::default()
            },
        )
    }

    pub fn update_user(&mut self, patch: &PreferencesPatch) -> EngineResult<()> {
        self.preferences.set(patch);
        self.persist()
    }

    pub fn calculate_total_monthly_spend(&self) -> f64 {
        insights::total_monthly_spend(self.subscriptions.list())
    }

    pub fn get_upcoming_renewals(&self, now: NaiveDate) -> Vec<Subscription> {
        self.get_upcoming_renewals_within(now, insights::DEFAULT_RENEWAL_WINDOW_DAYS)
    }

    pub fn get_upcoming_renewals_within(
        &self,
        now: NaiveDate,
        window_days: i64,
    ) -> Vec<Subscription> {
        insights::upcoming_renewals(self.subscriptions.list(), now, window_days)
    }

    pub fn get_subscriptions_by_category(&self) -> BTreeMap<Category, Vec<Subscription>> {
        insights::subscriptions_by_category(self.subscriptions.list())
    }

    pub fn get_trial_subscriptions(&self, now: NaiveDate) -> Vec<Subscription> {
        insights::trial_subscriptions(self.subscriptions.list(), now)
    }

    /// Thin wrapper over `update_subscription` that attaches a receipt URL.
    pub fn add_receipt_to_subscription(
        &mut self,
        id: SubscriptionId,
        receipt_url: impl Into<String>,
    ) -> EngineResult<UpdateOutcome> {
        self.update_subscription(
            id,
            &SubscriptionPatch {
                receipt_url: Some(Some(receipt_url.into())),
                ..Default::default()
            },
        )
    }

    pub fn record_monthly_spending(&mut self, now: NaiveDate) -> EngineResult<()> {
        self.ledger.record_snapshot(self.subscriptions.list(), now);
        self.persist()
    }

    pub fn get_monthly_spending_trend(&self) -> Vec<TrendPoint> {
        self.ledger.trend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BillingCycle;
    use crate::storage::{JsonStorage, LoadReport, Result as StorageResult};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Backend that loads nothing and discards saves; keeps facade tests off
    /// the filesystem.
    struct NullStorage;

    impl StorageBackend for NullStorage {
        fn load(&self) -> StorageResult<LoadReport> {
            Ok(LoadReport::default())
        }

        fn save(&self, _state: &StateSnapshot<'_>) -> StorageResult<()> {
            Ok(())
        }
    }

    fn empty_engine() -> SubscriptionEngine {
        let mut engine =
            SubscriptionEngine::open(Box::new(NullStorage), date(2025, 6, 1)).unwrap();
        let ids: Vec<_> = engine.subscriptions().iter().map(|s| s.id).collect();
        for id in ids {
            engine.delete_subscription(id).unwrap();
        }
        engine
    }

    #[test]
    fn open_without_persisted_state_uses_seeds() {
        let engine = SubscriptionEngine::open(Box::new(NullStorage), date(2025, 6, 1)).unwrap();
        assert_eq!(engine.subscriptions().len(), 8);
        assert_eq!(engine.spending_history().len(), 5);
        assert_eq!(engine.user().preferred_currency, "USD");
    }

    #[test]
    fn mixed_cycle_total_is_twenty() {
        let mut engine = empty_engine();
        engine
            .add_subscription(NewSubscription::new(
                "A",
                Category::Music,
                10.0,
                BillingCycle::Monthly,
                date(2025, 6, 10),
            ))
            .unwrap();
        engine
            .add_subscription(NewSubscription::new(
                "B",
                Category::Food,
                120.0,
                BillingCycle::Yearly,
                date(2025, 12, 1),
            ))
            .unwrap();
        assert_eq!(engine.calculate_total_monthly_spend(), 20.0);
    }

    #[test]
    fn delete_then_list_leaves_the_other_record() {
        let mut engine = empty_engine();
        let a = engine
            .add_subscription(NewSubscription::new(
                "A",
                Category::Music,
                10.0,
                BillingCycle::Monthly,
                date(2025, 6, 10),
            ))
            .unwrap();
        let b = engine
            .add_subscription(NewSubscription::new(
                "B",
                Category::Food,
                120.0,
                BillingCycle::Yearly,
                date(2025, 12, 1),
            ))
            .unwrap();
        assert_eq!(engine.delete_subscription(a.id).unwrap(), RemoveOutcome::Removed);
        let ids: Vec<_> = engine.subscriptions().iter().map(|s| s.id).collect();
        assert_eq!(ids, [b.id]);
    }

    #[test]
    fn soft_cancel_zeroes_the_total() {
        let mut engine = empty_engine();
        let b = engine
            .add_subscription(NewSubscription::new(
                "B",
                Category::Food,
                120.0,
                BillingCycle::Yearly,
                date(2025, 12, 1),
            ))
            .unwrap();
        assert_eq!(engine.cancel_subscription(b.id).unwrap(), UpdateOutcome::Updated);
        assert_eq!(engine.calculate_total_monthly_spend(), 0.0);
        // Soft cancel keeps the record, unlike delete.
        assert_eq!(engine.subscriptions().len(), 1);
    }

    #[test]
    fn non_positive_amount_is_rejected_at_the_facade() {
        let mut engine = empty_engine();
        let err = engine
            .add_subscription(NewSubscription::new(
                "Broken",
                Category::Music,
                0.0,
                BillingCycle::Monthly,
                date(2025, 6, 10),
            ))
            .expect_err("zero amount must be rejected");
        assert!(matches!(err, EngineError::Invalid(_)));
        assert!(engine.subscriptions().is_empty());
    }

    #[test]
    fn non_positive_amount_is_rejected_on_update_too() {
        let mut engine = empty_engine();
        let a = engine
            .add_subscription(NewSubscription::new(
                "A",
                Category::Music,
                10.0,
                BillingCycle::Monthly,
                date(2025, 6, 10),
            ))
            .unwrap();
        let err = engine
            .update_subscription(
                a.id,
                &SubscriptionPatch {
                    amount: Some(-5.0),
                    ..Default::default()
                },
            )
            .expect_err("negative amount must be rejected");
        assert!(matches!(err, EngineError::Invalid(_)));
        assert_eq!(engine.subscriptions()[0].amount, 10.0);
        assert_eq!(engine.calculate_total_monthly_spend(), 10.0);
    }

    #[test]
    fn unknown_id_reports_not_found() {
        let mut engine = empty_engine();
        let ghost = {
            let mut other = empty_engine();
            other
                .add_subscription(NewSubscription::new(
                    "Ghost",
                    Category::Music,
                    1.0,
                    BillingCycle::Monthly,
                    date(2025, 6, 10),
                ))
                .unwrap()
                .id
        };
        assert_eq!(
            engine.cancel_subscription(ghost).unwrap(),
            UpdateOutcome::NotFound
        );
        assert_eq!(
            engine.delete_subscription(ghost).unwrap(),
            RemoveOutcome::NotFound
        );
    }

    #[test]
    fn receipt_wrapper_sets_the_url() {
        let mut engine = empty_engine();
        let a = engine
            .add_subscription(NewSubscription::new(
                "A",
                Category::Music,
                10.0,
                BillingCycle::Monthly,
                date(2025, 6, 10),
            ))
            .unwrap();
        engine
            .add_receipt_to_subscription(a.id, "https://example.com/receipt.pdf")
            .unwrap();
        assert_eq!(
            engine.subscriptions()[0].receipt_url.as_deref(),
            Some("https://example.com/receipt.pdf")
        );
    }

    #[test]
    fn write_through_persists_after_every_mutation() {
        let temp = TempDir::new().unwrap();
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let mut engine =
            SubscriptionEngine::open(Box::new(storage.clone()), date(2025, 6, 1)).unwrap();
        engine
            .add_subscription(NewSubscription::new(
                "A",
                Category::Music,
                10.0,
                BillingCycle::Monthly,
                date(2025, 6, 10),
            ))
            .unwrap();

        let reopened = SubscriptionEngine::open(Box::new(storage), date(2025, 6, 1)).unwrap();
        assert_eq!(reopened.subscriptions().len(), 9, "8 seeds plus the new one");
        assert!(reopened.subscriptions().iter().any(|s| s.name == "A"));
    }
}
