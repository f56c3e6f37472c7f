use crate::domain::{NewSubscription, Subscription, SubscriptionId, SubscriptionPatch};

/// Result of addressing an existing record by id. A miss is reported, not
/// swallowed, so callers can tell "applied" from "never existed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Ordered collection of subscription records. Insertion order is preserved
/// and observable through `list`.
///
/// Mutations build the replacement collection and swap it in whole, so a
/// clone taken before the call never reflects a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionStore {
    items: Vec<Subscription>,
}

impl SubscriptionStore {
    pub fn new(items: Vec<Subscription>) -> Self {
        Self { items }
    }

    /// Assigns a fresh id and appends. The id space is random v4, wide enough
    /// that uniqueness is not re-verified against existing records.
    pub fn add(&mut self, new: NewSubscription) -> Subscription {
        let subscription = new.into_subscription(SubscriptionId::generate());
        let mut next = self.items.clone();
        next.push(subscription.clone());
        self.items = next;
        subscription
    }

    pub fn update(&mut self, id: SubscriptionId, patch: &SubscriptionPatch) -> UpdateOutcome {
        if !self.items.iter().any(|s| s.id == id) {
            return UpdateOutcome::NotFound;
        }
        self.items = self
            .items
            .iter()
            .map(|s| if s.id == id { patch.apply_to(s) } else { s.clone() })
            .collect();
        UpdateOutcome::Updated
    }

    pub fn remove(&mut self, id: SubscriptionId) -> RemoveOutcome {
        let next: Vec<Subscription> = self.items.iter().filter(|s| s.id != id).cloned().collect();
        if next.len() == self.items.len() {
            return RemoveOutcome::NotFound;
        }
        self.items = next;
        RemoveOutcome::Removed
    }

    pub fn get(&self, id: SubscriptionId) -> Option<&Subscription> {
        self.items.iter().find(|s| s.id == id)
    }

    pub fn list(&self) -> &[Subscription] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
