//! Store configuration, fixed at construction.
//!
//! Concurrent mutation of scoping fields while operations are in
//! flight has no sane meaning, so the options are consumed when the
//! store is built and never change afterwards.

use serde::{Deserialize, Serialize};

/// Configuration for a [`VaultStore`](crate::vault::store::VaultStore).
///
/// Every field has a default so `StoreOptions::default()` yields a
/// store with no namespace, no sharing group, and no sync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Prefix prepended to every account name presented to the vault.
    /// Two stores with different prefixes never collide, even with
    /// identical logical keys.
    pub key_prefix: String,

    /// Sharing-group label scoping entries to multiple client
    /// identities. `None` keeps entries private to this identity.
    pub access_group: Option<String>,

    /// Whether entries participate in cross-device sync. Writes pin
    /// the flag; reads and deletes match entries in any sync state so
    /// a synchronizable write is never shadowed by its own store.
    pub synchronizable: bool,
}

impl StoreOptions {
    /// Options with only a key prefix set.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty_scope() {
        let opts = StoreOptions::default();
        assert!(opts.key_prefix.is_empty());
        assert!(opts.access_group.is_none());
        assert!(!opts.synchronizable);
    }

    #[test]
    fn with_prefix_sets_only_the_prefix() {
        let opts = StoreOptions::with_prefix("app.");
        assert_eq!(opts.key_prefix, "app.");
        assert!(opts.access_group.is_none());
        assert!(!opts.synchronizable);
    }
}
