//! In-memory stores: the subscription entity store, the singleton preference
//! store, and the time-bucketed spending ledger.

pub mod ledger;
pub mod preferences;
pub mod subscriptions;

pub use ledger::SpendingLedger;
pub use preferences::PreferenceStore;
pub use subscriptions::{RemoveOutcome, SubscriptionStore, UpdateOutcome};
