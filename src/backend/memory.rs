//! In-memory vault backend.
//!
//! A process-local reference implementation of [`VaultBackend`] with
//! the full descriptor semantics — identity, access-group scoping, and
//! synchronizable matching behave as the platform vault's do. Nothing
//! here is encrypted or persisted: use it for tests and for platforms
//! without a secure store, not as a place to keep real credentials.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::status::Status;
use crate::vault::descriptor::{Descriptor, SyncMatch};

use super::{EntryAttributes, EnumerateReply, QueryReply, VaultBackend};

/// Entry identity inside one vault: namespaced account + access group.
/// (The item class is a third identity component in principle, but this
/// crate manages a single class.)
type EntryKey = (String, Option<String>);

/// One live entry.
struct StoredEntry {
    payload: Zeroizing<Vec<u8>>,
    synchronizable: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// The four primitive operations, for targeting injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Insert,
    QueryOne,
    Delete,
    Enumerate,
}

/// Process-local [`VaultBackend`].
///
/// Shared freely between stores — interior locking keeps the map
/// consistent under concurrent callers. A single-shot failure can be
/// injected with [`MemoryVault::inject_failure_on`] to exercise
/// callers' vault-failure paths.
pub struct MemoryVault {
    entries: RwLock<HashMap<EntryKey, StoredEntry>>,
    fail_next: Mutex<Option<(Primitive, Status)>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// Make the next `primitive` call fail with `status`, leaving the
    /// stored entries untouched. Other primitives are unaffected, and
    /// the call after the failed one behaves normally again. Test hook
    /// for the failure paths a healthy vault never takes.
    pub fn inject_failure_on(&self, primitive: Primitive, status: Status) {
        if let Ok(mut slot) = self.fail_next.lock() {
            *slot = Some((primitive, status));
        }
    }

    /// Take the injected failure if one is pending for `primitive`.
    fn pending_failure(&self, primitive: Primitive) -> Option<Status> {
        let Ok(mut slot) = self.fail_next.lock() else {
            return None;
        };
        match *slot {
            Some((target, status)) if target == primitive => {
                *slot = None;
                Some(status)
            }
            _ => None,
        }
    }

    /// Whether `entry` under `key` matches the descriptor's scoping
    /// attributes (access group and sync state). Account matching is
    /// done by the callers, which know whether the operation is keyed
    /// or scope-wide.
    fn matches_scope(desc: &Descriptor, key: &EntryKey, entry: &StoredEntry) -> bool {
        if key.1 != desc.access_group {
            return false;
        }
        match desc.synchronizable {
            // No sync attribute on the descriptor only matches entries
            // written without the flag.
            None => !entry.synchronizable,
            Some(SyncMatch::Exact(flag)) => entry.synchronizable == flag,
            Some(SyncMatch::Any) => true,
        }
    }
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultBackend for MemoryVault {
    fn insert(&self, desc: &Descriptor) -> Status {
        if let Some(status) = self.pending_failure(Primitive::Insert) {
            return status;
        }
        let (Some(account), Some(payload)) = (&desc.account, &desc.payload) else {
            return Status::INVALID_PARAMETER;
        };

        let Ok(mut entries) = self.entries.write() else {
            return Status::NOT_AVAILABLE;
        };

        let key = (account.clone(), desc.access_group.clone());
        if entries.contains_key(&key) {
            return Status::DUPLICATE_ITEM;
        }

        let now = Utc::now();
        let synchronizable = matches!(desc.synchronizable, Some(SyncMatch::Exact(true)));
        entries.insert(
            key,
            StoredEntry {
                payload: Zeroizing::new(payload.clone()),
                synchronizable,
                created_at: now,
                updated_at: now,
            },
        );
        Status::SUCCESS
    }

    fn query_one(&self, desc: &Descriptor) -> QueryReply {
        if let Some(status) = self.pending_failure(Primitive::QueryOne) {
            return QueryReply::failed(status);
        }
        let Some(account) = &desc.account else {
            return QueryReply::failed(Status::INVALID_PARAMETER);
        };

        let Ok(entries) = self.entries.read() else {
            return QueryReply::failed(Status::NOT_AVAILABLE);
        };

        let key = (account.clone(), desc.access_group.clone());
        match entries.get(&key) {
            Some(entry) if Self::matches_scope(desc, &key, entry) => QueryReply {
                status: Status::SUCCESS,
                payload: desc.return_data.then(|| entry.payload.to_vec()),
            },
            _ => QueryReply::failed(Status::ITEM_NOT_FOUND),
        }
    }

    fn delete(&self, desc: &Descriptor) -> Status {
        if let Some(status) = self.pending_failure(Primitive::Delete) {
            return status;
        }
        let Ok(mut entries) = self.entries.write() else {
            return Status::NOT_AVAILABLE;
        };

        match &desc.account {
            Some(account) => {
                let key = (account.clone(), desc.access_group.clone());
                match entries.get(&key) {
                    Some(entry) if Self::matches_scope(desc, &key, entry) => {
                        entries.remove(&key);
                        Status::SUCCESS
                    }
                    _ => Status::ITEM_NOT_FOUND,
                }
            }
            // No account: remove everything in (access group, sync) scope.
            None => {
                let before = entries.len();
                entries.retain(|key, entry| !Self::matches_scope(desc, key, entry));
                if entries.len() < before {
                    Status::SUCCESS
                } else {
                    Status::ITEM_NOT_FOUND
                }
            }
        }
    }

    fn enumerate(&self, desc: &Descriptor) -> EnumerateReply {
        if let Some(status) = self.pending_failure(Primitive::Enumerate) {
            return EnumerateReply::failed(status);
        }
        let Ok(entries) = self.entries.read() else {
            return EnumerateReply::failed(Status::NOT_AVAILABLE);
        };

        let records: Vec<EntryAttributes> = entries
            .iter()
            .filter(|(key, entry)| Self::matches_scope(desc, key, entry))
            .map(|(key, entry)| EntryAttributes {
                account: key.0.clone(),
                access_group: key.1.clone(),
                synchronizable: entry.synchronizable,
                created_at: entry.created_at,
                updated_at: entry.updated_at,
            })
            .collect();

        EnumerateReply {
            status: Status::SUCCESS,
            records,
        }
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::accessibility::Accessibility;

    fn insert_desc(account: &str, payload: &[u8]) -> Descriptor {
        Descriptor::insert(account.into(), payload.to_vec(), Accessibility::default())
    }

    #[test]
    fn insert_then_query_returns_payload() {
        let vault = MemoryVault::new();
        assert_eq!(vault.insert(&insert_desc("a", b"v")), Status::SUCCESS);

        let reply = vault.query_one(&Descriptor::lookup("a".into()));
        assert_eq!(reply.status, Status::SUCCESS);
        assert_eq!(reply.payload.as_deref(), Some(b"v".as_slice()));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let vault = MemoryVault::new();
        assert_eq!(vault.insert(&insert_desc("a", b"v1")), Status::SUCCESS);
        assert_eq!(vault.insert(&insert_desc("a", b"v2")), Status::DUPLICATE_ITEM);
    }

    #[test]
    fn insert_without_payload_is_invalid() {
        let vault = MemoryVault::new();
        let desc = Descriptor::erase(Some("a".into()));
        assert_eq!(vault.insert(&desc), Status::INVALID_PARAMETER);
    }

    #[test]
    fn access_groups_partition_entries() {
        let vault = MemoryVault::new();
        vault.insert(&insert_desc("a", b"private"));
        vault.insert(&insert_desc("a", b"shared").with_access_group("team".into()));

        let private = vault.query_one(&Descriptor::lookup("a".into()));
        assert_eq!(private.payload.as_deref(), Some(b"private".as_slice()));

        let shared = vault.query_one(&Descriptor::lookup("a".into()).with_access_group("team".into()));
        assert_eq!(shared.payload.as_deref(), Some(b"shared".as_slice()));
    }

    #[test]
    fn sync_entry_is_invisible_without_sync_attribute() {
        let vault = MemoryVault::new();
        let desc = insert_desc("a", b"v").with_synchronizable(SyncMatch::Exact(true));
        assert_eq!(vault.insert(&desc), Status::SUCCESS);

        // A descriptor with no sync attribute only sees non-sync entries.
        let plain = vault.query_one(&Descriptor::lookup("a".into()));
        assert_eq!(plain.status, Status::ITEM_NOT_FOUND);

        // The wildcard sees it.
        let any = vault.query_one(&Descriptor::lookup("a".into()).with_synchronizable(SyncMatch::Any));
        assert_eq!(any.status, Status::SUCCESS);
    }

    #[test]
    fn scope_wide_delete_removes_only_matching_group() {
        let vault = MemoryVault::new();
        vault.insert(&insert_desc("a", b"1"));
        vault.insert(&insert_desc("b", b"2"));
        vault.insert(&insert_desc("c", b"3").with_access_group("team".into()));

        assert_eq!(vault.delete(&Descriptor::erase(None)), Status::SUCCESS);

        // Default-group entries are gone, the team entry survives.
        assert_eq!(
            vault.query_one(&Descriptor::lookup("a".into())).status,
            Status::ITEM_NOT_FOUND
        );
        assert_eq!(
            vault
                .query_one(&Descriptor::lookup("c".into()).with_access_group("team".into()))
                .status,
            Status::SUCCESS
        );
    }

    #[test]
    fn delete_missing_reports_not_found() {
        let vault = MemoryVault::new();
        assert_eq!(
            vault.delete(&Descriptor::erase(Some("nope".into()))),
            Status::ITEM_NOT_FOUND
        );
        assert_eq!(vault.delete(&Descriptor::erase(None)), Status::ITEM_NOT_FOUND);
    }

    #[test]
    fn injected_failure_hits_its_primitive_once() {
        let vault = MemoryVault::new();
        vault.insert(&insert_desc("a", b"v"));

        vault.inject_failure_on(Primitive::QueryOne, Status::NOT_AVAILABLE);

        // Other primitives are unaffected while the failure is armed.
        assert_eq!(vault.delete(&Descriptor::erase(Some("x".into()))), Status::ITEM_NOT_FOUND);

        let failed = vault.query_one(&Descriptor::lookup("a".into()));
        assert_eq!(failed.status, Status::NOT_AVAILABLE);
        assert!(failed.payload.is_none());

        let ok = vault.query_one(&Descriptor::lookup("a".into()));
        assert_eq!(ok.status, Status::SUCCESS);
    }

    #[test]
    fn enumerate_lists_scope_records() {
        let vault = MemoryVault::new();
        vault.insert(&insert_desc("app.a", b"1"));
        vault.insert(&insert_desc("app.b", b"2"));
        vault.insert(&insert_desc("other", b"3").with_access_group("team".into()));

        let reply = vault.enumerate(&Descriptor::enumerate());
        assert_eq!(reply.status, Status::SUCCESS);
        let mut accounts: Vec<_> = reply.records.iter().map(|r| r.account.as_str()).collect();
        accounts.sort_unstable();
        assert_eq!(accounts, ["app.a", "app.b"]);
        assert!(reply.records.iter().all(|r| r.created_at <= Utc::now()));
    }
}
