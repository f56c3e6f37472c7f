//! Domain records shared by the stores, derivations, and persistence layer.

pub mod preferences;
pub mod spending;
pub mod subscription;

pub use preferences::{Preferences, PreferencesPatch};
pub use spending::{Month, SpendingRecord, TrendPoint};
pub use subscription::{
    BillingCycle, Category, NewSubscription, Subscription, SubscriptionId, SubscriptionKind,
    SubscriptionPatch, UsageFrequency,
};
