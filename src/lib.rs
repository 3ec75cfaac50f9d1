//! SecretStore — a thread-safe key-value store over the platform's
//! secure credential vault.
//!
//! The [`VaultStore`] saves opaque byte (or text) payloads under string
//! keys, optionally namespaced by a key prefix, scoped to a sharing
//! group, and marked for cross-device sync.  Encryption at rest belongs
//! to the platform vault; this crate builds the per-operation
//! descriptors, serializes concurrent access, and turns the vault's
//! integer status codes into typed errors.
//!
//! ```
//! use std::sync::Arc;
//! use secretstore::{MemoryVault, StoreOptions, VaultStore};
//!
//! let store = VaultStore::with_prefix(Arc::new(MemoryVault::new()), "app.");
//! store.save_text("auth", "secret-token").unwrap();
//! assert_eq!(store.get_text("auth").unwrap(), "secret-token");
//! store.delete("auth").unwrap();
//! assert!(store.get("auth").is_err());
//! ```

pub mod backend;
pub mod errors;
pub mod status;
pub mod vault;

// Re-export the public surface at the crate root.
pub use backend::{EntryAttributes, EnumerateReply, MemoryVault, QueryReply, VaultBackend};
pub use errors::{Result, SecretStoreError};
pub use status::Status;
pub use vault::{Accessibility, Descriptor, ItemClass, MatchLimit, StoreOptions, SyncMatch, VaultStore};

#[cfg(feature = "keyring-store")]
pub use backend::KeyringVault;
