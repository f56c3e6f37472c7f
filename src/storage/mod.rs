pub mod json_backend;

use crate::domain::{Preferences, SpendingRecord, Subscription};
use crate::errors::EngineError;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Full state handed to the backend on every write-through save.
#[derive(Debug, Clone, Copy)]
pub struct StateSnapshot<'a> {
    pub subscriptions: &'a [Subscription],
    pub user: &'a Preferences,
    pub spending_history: &'a [SpendingRecord],
}

/// Outcome of a load. Each blob is independent: `None` means the blob was
/// absent or unreadable and the caller should fall back to its default.
/// Unreadable blobs add a human-readable warning rather than failing the
/// whole load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub subscriptions: Option<Vec<Subscription>>,
    pub user: Option<Preferences>,
    pub spending_history: Option<Vec<SpendingRecord>>,
    pub warnings: Vec<String>,
}

/// Abstraction over persistence backends for the three state blobs.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<LoadReport>;
    fn save(&self, state: &StateSnapshot<'_>) -> Result<()>;
}

pub use json_backend::JsonStorage;
