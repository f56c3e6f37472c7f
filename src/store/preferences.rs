use crate::domain::{Preferences, PreferencesPatch};

/// Holds the singleton settings record.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    current: Preferences,
}

impl PreferenceStore {
    pub fn new(current: Preferences) -> Self {
        Self { current }
    }

    pub fn get(&self) -> &Preferences {
        &self.current
    }

    /// Shallow merge over the current record; the record itself is replaced
    /// whole.
    pub fn set(&mut self, patch: &PreferencesPatch) {
        self.current = patch.apply_to(&self.current);
    }
}
