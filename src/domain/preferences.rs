use serde::{Deserialize, Serialize};

/// Singleton user settings record. Created with defaults at engine start,
/// mutated in place, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    /// `None` means no identity is present.
    pub email: Option<String>,
    pub preferred_currency: String,
    pub dark_mode: bool,
    pub reminder_days: u32,
    pub notifications_enabled: bool,
    pub email_notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            email: None,
            preferred_currency: "USD".into(),
            dark_mode: false,
            reminder_days: 3,
            notifications_enabled: true,
            email_notifications: false,
        }
    }
}

/// Partial settings update, merged by shallow overwrite.
#[derive(Debug, Clone, Default)]
pub struct PreferencesPatch {
    pub email: Option<Option<String>>,
    pub preferred_currency: Option<String>,
    pub dark_mode: Option<bool>,
    pub reminder_days: Option<u32>,
    pub notifications_enabled: Option<bool>,
    pub email_notifications: Option<bool>,
}

impl PreferencesPatch {
    pub fn apply_to(&self, preferences: &Preferences) -> Preferences {
        let mut updated = preferences.clone();
        if let Some(email) = &self.email {
            updated.email = email.clone();
        }
        if let Some(currency) = &self.preferred_currency {
            updated.preferred_currency = currency.clone();
        }
        if let Some(dark_mode) = self.dark_mode {
            updated.dark_mode = dark_mode;
        }
        if let Some(days) = self.reminder_days {
            updated.reminder_days = days;
        }
        if let Some(enabled) = self.notifications_enabled {
            updated.notifications_enabled = enabled;
        }
        if let Some(enabled) = self.email_notifications {
            updated.email_notifications = enabled;
        }
        updated
    }
}
