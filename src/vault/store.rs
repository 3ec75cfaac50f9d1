//! High-level store over a vault backend.
//!
//! `VaultStore` owns all interaction with the underlying vault: it
//! builds the descriptor for each operation, serializes access through
//! a per-instance lock, and translates the backend's status codes into
//! typed results.  Create one with [`VaultStore::new`] (or
//! [`VaultStore::with_options`] for a namespaced / scoped store), then
//! use its methods like `store.save_text("auth", "secret-token")`.

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, warn};
use zeroize::Zeroize;

use crate::backend::VaultBackend;
use crate::errors::{Result, SecretStoreError};
use crate::status::Status;

use super::accessibility::Accessibility;
use super::descriptor::{Descriptor, SyncMatch};
use super::options::StoreOptions;

/// Thread-safe key-value store over a platform vault.
///
/// Any number of threads may call into one instance. Every operation,
/// reads and enumeration included, holds the instance lock for the
/// duration of its backend call(s), so operations on the same instance
/// never interleave.  Two instances over one backend are only
/// serialized by the backend itself.
///
/// Configuration (key prefix, access group, synchronizable) is fixed
/// at construction and immutable for the lifetime of the store.
pub struct VaultStore {
    backend: Arc<dyn VaultBackend>,
    options: StoreOptions,
    lock: Mutex<()>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// A store with default options: no prefix, no access group, not
    /// synchronizable.
    pub fn new(backend: Arc<dyn VaultBackend>) -> Self {
        Self::with_options(backend, StoreOptions::default())
    }

    /// A store namespacing every account under `prefix`.
    pub fn with_prefix(backend: Arc<dyn VaultBackend>, prefix: impl Into<String>) -> Self {
        Self::with_options(backend, StoreOptions::with_prefix(prefix))
    }

    /// A store with explicit [`StoreOptions`].
    pub fn with_options(backend: Arc<dyn VaultBackend>, options: StoreOptions) -> Self {
        Self {
            backend,
            options,
            lock: Mutex::new(()),
        }
    }

    // ------------------------------------------------------------------
    // Save
    // ------------------------------------------------------------------

    /// Store `value` under `key` with the default accessibility policy.
    ///
    /// See [`save_with_access`](Self::save_with_access) for the failure
    /// contract.
    pub fn save(&self, key: &str, value: &[u8]) -> Result<()> {
        self.save_with_access(key, value, Accessibility::default())
    }

    /// Store a text value under `key`.
    pub fn save_text(&self, key: &str, value: &str) -> Result<()> {
        self.save(key, value.as_bytes())
    }

    /// Store `value` under `key`, readable per `access`.
    ///
    /// Writes are last-write-wins, implemented as delete-then-insert:
    /// any existing entry under the namespaced key is removed first,
    /// unconditionally.  On `Err` the key is therefore absent or in an
    /// indeterminate state — never "unchanged".  Through this instance
    /// the intermediate absence is unobservable (every operation holds
    /// the instance lock), but a second store instance over the same
    /// backend may observe it.
    pub fn save_with_access(&self, key: &str, value: &[u8], access: Accessibility) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let account = self.namespaced(key);
        debug!("saving entry '{account}'");

        // Clear out any previous entry; absence here is the normal case.
        let erased = self
            .backend
            .delete(&self.scoped(Descriptor::erase(Some(account.clone())), false));
        if !erased.is_success() && erased != Status::ITEM_NOT_FOUND {
            debug!("pre-delete of '{account}' reported status {erased}");
        }

        let desc = self.scoped(
            Descriptor::insert(account.clone(), value.to_vec(), access),
            true,
        );
        let status = self.backend.insert(&desc);
        if status.is_success() {
            Ok(())
        } else {
            warn!("vault insert for '{account}' failed with status {status}");
            Err(self.vault_error(status))
        }
    }

    // ------------------------------------------------------------------
    // Get
    // ------------------------------------------------------------------

    /// Retrieve the raw bytes stored under `key`.
    ///
    /// Returns [`SecretStoreError::NotFound`] when no entry matches and
    /// [`SecretStoreError::Vault`] when the vault rejected the call;
    /// the native code is available from either via
    /// [`status`](SecretStoreError::status).
    pub fn get(&self, key: &str) -> Result<Vec<u8>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let account = self.namespaced(key);
        let desc = self.scoped(Descriptor::lookup(account.clone()), false);
        let reply = self.backend.query_one(&desc);

        if reply.status.is_success() {
            reply
                .payload
                .ok_or(SecretStoreError::Vault(Status::NOT_AVAILABLE))
        } else if reply.status == Status::ITEM_NOT_FOUND {
            Err(SecretStoreError::NotFound(key.to_string()))
        } else {
            warn!("vault lookup for '{account}' failed with status {}", reply.status);
            Err(self.vault_error(reply.status))
        }
    }

    /// Retrieve the value stored under `key` as text.
    ///
    /// Fails with [`SecretStoreError::Decoding`], distinct from
    /// `NotFound`, when the stored bytes are not valid UTF-8.  The
    /// undecodable bytes are zeroized before the error is returned.
    pub fn get_text(&self, key: &str) -> Result<String> {
        let bytes = self.get(key)?;
        String::from_utf8(bytes).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            SecretStoreError::Decoding(key.to_string())
        })
    }

    /// Whether an entry exists under `key`. No payload is transferred.
    pub fn contains(&self, key: &str) -> Result<bool> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut desc = self.scoped(Descriptor::lookup(self.namespaced(key)), false);
        desc.return_data = false;
        let reply = self.backend.query_one(&desc);

        if reply.status.is_success() {
            Ok(true)
        } else if reply.status == Status::ITEM_NOT_FOUND {
            Ok(false)
        } else {
            Err(self.vault_error(reply.status))
        }
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Remove the entry stored under `key`.
    ///
    /// Deleting an absent key fails with
    /// [`SecretStoreError::NotFound`] — the operation is deliberately
    /// not idempotent.  Callers that only care about "gone afterwards"
    /// must accept `NotFound` as success.
    pub fn delete(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let account = self.namespaced(key);
        debug!("deleting entry '{account}'");
        let status = self
            .backend
            .delete(&self.scoped(Descriptor::erase(Some(account)), false));

        if status.is_success() {
            Ok(())
        } else if status == Status::ITEM_NOT_FOUND {
            Err(SecretStoreError::NotFound(key.to_string()))
        } else {
            Err(self.vault_error(status))
        }
    }

    /// Remove **every** entry in this store's scope.
    ///
    /// The scope is class + access group + sync state: the key prefix
    /// plays no part, because the descriptor carries no account filter.
    /// Entries written by other stores with different prefixes in the
    /// same scope are removed too.  Clearing an already-empty scope
    /// fails with the vault's not-found status.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        debug!("clearing every entry in scope");
        let status = self.backend.delete(&self.scoped(Descriptor::erase(None), false));
        if status.is_success() {
            Ok(())
        } else {
            warn!("vault clear failed with status {status}");
            Err(self.vault_error(status))
        }
    }

    // ------------------------------------------------------------------
    // Enumeration
    // ------------------------------------------------------------------

    /// Account names of every entry in this store's scope, in the
    /// order the vault reports them (not guaranteed sorted).
    ///
    /// Names come back **namespaced**, with the configured prefix
    /// intact, and, like [`clear`](Self::clear), the scope is not limited to
    /// this store's prefix.  Callers mapping back to logical keys strip
    /// the prefix themselves.
    pub fn keys(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let desc = self.scoped(Descriptor::enumerate(), false);
        let reply = self.backend.enumerate(&desc);

        if reply.status.is_success() {
            Ok(reply.records.into_iter().map(|r| r.account).collect())
        } else {
            warn!("vault enumeration failed with status {}", reply.status);
            Err(self.vault_error(reply.status))
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The prefix prepended to every account name.
    pub fn key_prefix(&self) -> &str {
        &self.options.key_prefix
    }

    /// The sharing-group scope, if configured.
    pub fn access_group(&self) -> Option<&str> {
        self.options.access_group.as_deref()
    }

    /// Whether entries written by this store participate in sync.
    pub fn synchronizable(&self) -> bool {
        self.options.synchronizable
    }

    // ------------------------------------------------------------------
    // Descriptor building
    // ------------------------------------------------------------------

    /// Prepend the configured prefix to a logical key.
    fn namespaced(&self, key: &str) -> String {
        format!("{}{key}", self.options.key_prefix)
    }

    /// Apply the store's scoping attributes to a descriptor.
    ///
    /// The access group is attached iff one is configured.  The
    /// synchronizable attribute is attached iff the store is
    /// synchronizable: pinned to `true` when `adding` an entry, and a
    /// match-any wildcard otherwise, so reads and deletes find the
    /// entry regardless of the sync state it was written with.
    fn scoped(&self, mut desc: Descriptor, adding: bool) -> Descriptor {
        if let Some(group) = &self.options.access_group {
            desc = desc.with_access_group(group.clone());
        }
        if self.options.synchronizable {
            let sync = if adding {
                SyncMatch::Exact(true)
            } else {
                SyncMatch::Any
            };
            desc = desc.with_synchronizable(sync);
        }
        desc
    }

    /// Map a failure status to the error callers see.
    fn vault_error(&self, status: Status) -> SecretStoreError {
        if status == Status::UNSUPPORTED_OPERATION {
            SecretStoreError::Unsupported {
                backend: self.backend.name(),
            }
        } else {
            SecretStoreError::Vault(status)
        }
    }
}
