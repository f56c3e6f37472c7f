use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque subscription identifier. Assigned by the store on creation and
/// never supplied by callers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of spending categories. Variant order is the canonical
/// presentation order and drives `Ord`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Entertainment,
    Music,
    Food,
    Productivity,
    Shopping,
    #[serde(rename = "Health & Fitness")]
    HealthAndFitness,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Entertainment,
        Category::Music,
        Category::Food,
        Category::Productivity,
        Category::Shopping,
        Category::HealthAndFitness,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Entertainment => "Entertainment",
            Category::Music => "Music",
            Category::Food => "Food",
            Category::Productivity => "Productivity",
            Category::Shopping => "Shopping",
            Category::HealthAndFitness => "Health & Fitness",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UsageFrequency {
    Daily,
    Weekly,
    Monthly,
    Rarely,
}

/// Distinguishes a regular subscription from a free trial. A trial always
/// carries its end date, so a trial without one cannot be constructed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubscriptionKind {
    #[default]
    Regular,
    Trial { trial_end_date: NaiveDate },
}

impl SubscriptionKind {
    pub fn trial_end_date(&self) -> Option<NaiveDate> {
        match self {
            SubscriptionKind::Regular => None,
            SubscriptionKind::Trial { trial_end_date } => Some(*trial_end_date),
        }
    }
}

/// A recurring paid service tracked by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub name: String,
    pub category: Category,
    pub amount: f64,
    pub billing_cycle: BillingCycle,
    pub renewal_date: NaiveDate,
    pub is_active: bool,
    #[serde(flatten)]
    pub kind: SubscriptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_frequency: Option<UsageFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Subscription {
    /// The common unit for cross-cycle aggregation: a yearly amount spread
    /// over twelve months, a monthly amount unchanged.
    pub fn monthly_equivalent(&self) -> f64 {
        match self.billing_cycle {
            BillingCycle::Monthly => self.amount,
            BillingCycle::Yearly => self.amount / 12.0,
        }
    }

    pub fn is_trial(&self) -> bool {
        matches!(self.kind, SubscriptionKind::Trial { .. })
    }
}

/// Input for creating a subscription; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub category: Category,
    pub amount: f64,
    pub billing_cycle: BillingCycle,
    pub renewal_date: NaiveDate,
    pub is_active: bool,
    pub kind: SubscriptionKind,
    pub receipt_url: Option<String>,
    pub usage_frequency: Option<UsageFrequency>,
    pub notes: Option<String>,
}

impl NewSubscription {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        amount: f64,
        billing_cycle: BillingCycle,
        renewal_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            amount,
            billing_cycle,
            renewal_date,
            is_active: true,
            kind: SubscriptionKind::Regular,
            receipt_url: None,
            usage_frequency: None,
            notes: None,
        }
    }

    pub fn trial(mut self, trial_end_date: NaiveDate) -> Self {
        self.kind = SubscriptionKind::Trial { trial_end_date };
        self
    }

    pub(crate) fn into_subscription(self, id: SubscriptionId) -> Subscription {
        Subscription {
            id,
            name: self.name,
            category: self.category,
            amount: self.amount,
            billing_cycle: self.billing_cycle,
            renewal_date: self.renewal_date,
            is_active: self.is_active,
            kind: self.kind,
            receipt_url: self.receipt_url,
            usage_frequency: self.usage_frequency,
            notes: self.notes,
        }
    }
}

/// Partial update applied by shallow overwrite; absent fields are untouched.
/// The optional record fields use the outer/inner `Option` split so a patch
/// can also clear them: `Some(None)` resets the field, `None` leaves it.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub amount: Option<f64>,
    pub billing_cycle: Option<BillingCycle>,
    pub renewal_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
    pub kind: Option<SubscriptionKind>,
    pub receipt_url: Option<Option<String>>,
    pub usage_frequency: Option<Option<UsageFrequency>>,
    pub notes: Option<Option<String>>,
}

impl SubscriptionPatch {
    pub fn apply_to(&self, subscription: &Subscription) -> Subscription {
        let mut updated = subscription.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(category) = self.category {
            updated.category = category;
        }
        if let Some(amount) = self.amount {
            updated.amount = amount;
        }
        if let Some(cycle) = self.billing_cycle {
            updated.billing_cycle = cycle;
        }
        if let Some(date) = self.renewal_date {
            updated.renewal_date = date;
        }
        if let Some(active) = self.is_active {
            updated.is_active = active;
        }
        if let Some(kind) = self.kind {
            updated.kind = kind;
        }
        if let Some(url) = &self.receipt_url {
            updated.receipt_url = url.clone();
        }
        if let Some(frequency) = self.usage_frequency {
            updated.usage_frequency = frequency;
        }
        if let Some(notes) = &self.notes {
            updated.notes = notes.clone();
        }
        updated
    }
}
