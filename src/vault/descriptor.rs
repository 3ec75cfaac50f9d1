//! Descriptors — the structured attribute sets submitted to a backend.
//!
//! Every vault primitive is driven by a [`Descriptor`]: the mandatory
//! class, an account for anything keyed to a single entry, and the
//! operation-specific attributes (payload on insert, return flags and a
//! match limit on reads).  The scoping attributes — access group and
//! synchronizable — are only present when the owning store is
//! configured with them; an absent attribute and an attribute set to a
//! value mean different things to the platform, so `Option` is load-
//! bearing here.

use crate::vault::accessibility::Accessibility;

/// Item class of every entry this crate manages.
///
/// A single class today; kept explicit because the class participates
/// in entry identity and in every descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemClass {
    /// A generic stored secret (the "generic password" class).
    #[default]
    GenericSecret,
}

/// How many entries a read may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLimit {
    /// Exactly one entry (point lookup).
    One,
    /// Every matching entry (enumeration).
    All,
}

/// The synchronizable attribute, as written or as matched.
///
/// Inserts pin the concrete value; reads and deletes from a
/// synchronizable store use [`SyncMatch::Any`] so they still find an
/// entry regardless of the sync state it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMatch {
    /// The entry's flag must equal this value.
    Exact(bool),
    /// Match entries in any sync state.
    Any,
}

/// Attribute set for one backend primitive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub class: ItemClass,

    /// Namespaced account name. `None` on scope-wide operations
    /// (clear, enumerate), which deliberately omit the account filter.
    pub account: Option<String>,

    /// Entry payload. Insert only.
    pub payload: Option<Vec<u8>>,

    /// Accessibility policy. Insert only.
    pub accessibility: Option<Accessibility>,

    /// Sharing-group scope, when the store is configured with one.
    pub access_group: Option<String>,

    /// Sync attribute, when the store is synchronizable.
    pub synchronizable: Option<SyncMatch>,

    /// Ask the backend to return entry payloads.
    pub return_data: bool,

    /// Ask the backend to return entry attribute records.
    pub return_attributes: bool,

    /// Read fan-out. Ignored by insert and delete.
    pub match_limit: MatchLimit,
}

impl Descriptor {
    /// The mandatory base every operation starts from: class plus an
    /// optional account, nothing else set.
    fn base(account: Option<String>) -> Self {
        Self {
            class: ItemClass::GenericSecret,
            account,
            payload: None,
            accessibility: None,
            access_group: None,
            synchronizable: None,
            return_data: false,
            return_attributes: false,
            match_limit: MatchLimit::One,
        }
    }

    /// Descriptor for inserting `payload` under `account`.
    pub fn insert(account: String, payload: Vec<u8>, access: Accessibility) -> Self {
        Self {
            payload: Some(payload),
            accessibility: Some(access),
            ..Self::base(Some(account))
        }
    }

    /// Descriptor for a point lookup of `account`'s payload.
    pub fn lookup(account: String) -> Self {
        Self {
            return_data: true,
            match_limit: MatchLimit::One,
            ..Self::base(Some(account))
        }
    }

    /// Descriptor for deleting `account`'s entry, or — with `None` —
    /// every entry in the descriptor's scope.
    pub fn erase(account: Option<String>) -> Self {
        Self::base(account)
    }

    /// Descriptor for enumerating every entry in scope, attributes
    /// included.
    pub fn enumerate() -> Self {
        Self {
            return_data: true,
            return_attributes: true,
            match_limit: MatchLimit::All,
            ..Self::base(None)
        }
    }

    /// Scope the descriptor to a sharing group.
    pub fn with_access_group(mut self, group: String) -> Self {
        self.access_group = Some(group);
        self
    }

    /// Attach the synchronizable attribute.
    pub fn with_synchronizable(mut self, sync: SyncMatch) -> Self {
        self.synchronizable = Some(sync);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_carries_payload_and_policy() {
        let desc = Descriptor::insert("app.auth".into(), b"tok".to_vec(), Accessibility::default());
        assert_eq!(desc.account.as_deref(), Some("app.auth"));
        assert_eq!(desc.payload.as_deref(), Some(b"tok".as_slice()));
        assert_eq!(desc.accessibility, Some(Accessibility::WhenUnlocked));
        assert!(!desc.return_data);
    }

    #[test]
    fn lookup_requests_one_payload() {
        let desc = Descriptor::lookup("app.auth".into());
        assert!(desc.return_data);
        assert!(!desc.return_attributes);
        assert_eq!(desc.match_limit, MatchLimit::One);
        assert!(desc.payload.is_none());
    }

    #[test]
    fn enumerate_requests_all_attributes_without_account() {
        let desc = Descriptor::enumerate();
        assert!(desc.account.is_none());
        assert!(desc.return_attributes);
        assert_eq!(desc.match_limit, MatchLimit::All);
    }

    #[test]
    fn scoping_attributes_default_to_absent() {
        let desc = Descriptor::lookup("k".into());
        assert!(desc.access_group.is_none());
        assert!(desc.synchronizable.is_none());

        let scoped = Descriptor::lookup("k".into())
            .with_access_group("team.shared".into())
            .with_synchronizable(SyncMatch::Any);
        assert_eq!(scoped.access_group.as_deref(), Some("team.shared"));
        assert_eq!(scoped.synchronizable, Some(SyncMatch::Any));
    }
}
