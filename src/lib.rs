#![doc(test(attr(deny(warnings))))]

//! Subtrack Core tracks recurring paid services, derives spending insights
//! from them, and persists everything across sessions through a simple
//! write-through JSON boundary.

pub mod domain;
pub mod engine;
pub mod errors;
pub mod insights;
pub mod seed;
pub mod storage;
pub mod store;
pub mod utils;

pub use engine::{EngineResult, SubscriptionEngine};
pub use errors::EngineError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Subtrack Core tracing initialized.");
    });
}
