//! Vault module — the store and its vocabulary types.
//!
//! This module provides:
//! - `Accessibility` policies (`accessibility`)
//! - `Descriptor` attribute sets submitted to backends (`descriptor`)
//! - `StoreOptions` construction-time configuration (`options`)
//! - High-level `VaultStore` for saving, reading, and removing
//!   secrets (`store`)

pub mod accessibility;
pub mod descriptor;
pub mod options;
pub mod store;

// Re-export the most commonly used items.
pub use accessibility::Accessibility;
pub use descriptor::{Descriptor, ItemClass, MatchLimit, SyncMatch};
pub use options::StoreOptions;
pub use store::VaultStore;
