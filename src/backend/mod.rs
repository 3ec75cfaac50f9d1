//! Vault backends — bindings to a platform secure store.
//!
//! This module defines the four descriptor-driven primitives the store
//! is built on and the backends that implement them:
//! - [`VaultBackend`] — the primitive interface (`insert`, `query_one`,
//!   `delete`, `enumerate`)
//! - [`MemoryVault`], a process-local reference backend (`memory`)
//! - `KeyringVault`, the OS credential store, behind the
//!   `keyring-store` feature (`keyring`)
//!
//! Backends report plain [`Status`] codes, not rich errors: the
//! underlying trust subsystems speak integer result codes, and the
//! store is the layer that translates those into typed errors.

pub mod memory;

#[cfg(feature = "keyring-store")]
pub mod keyring;

use chrono::{DateTime, Utc};

use crate::status::Status;
use crate::vault::descriptor::Descriptor;

pub use memory::{MemoryVault, Primitive};

#[cfg(feature = "keyring-store")]
pub use keyring::KeyringVault;

/// Attribute record for one stored entry, as returned by
/// [`VaultBackend::enumerate`]. Payloads are never included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryAttributes {
    /// The namespaced account name exactly as stored.
    pub account: String,

    /// The sharing group the entry lives in, if any.
    pub access_group: Option<String>,

    /// Whether the entry participates in cross-device sync.
    pub synchronizable: bool,

    /// When the entry was first inserted.
    pub created_at: DateTime<Utc>,

    /// When the entry's payload was last replaced.
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a point lookup.
#[derive(Debug, Clone)]
pub struct QueryReply {
    pub status: Status,
    /// The entry payload. Present iff `status` is success.
    pub payload: Option<Vec<u8>>,
}

impl QueryReply {
    /// A failed lookup carrying no payload.
    pub fn failed(status: Status) -> Self {
        Self {
            status,
            payload: None,
        }
    }
}

/// Outcome of an enumeration.
#[derive(Debug, Clone)]
pub struct EnumerateReply {
    pub status: Status,
    /// One record per matching entry, in backend-reported order.
    /// Empty unless `status` is success.
    pub records: Vec<EntryAttributes>,
}

impl EnumerateReply {
    /// A failed enumeration carrying no records.
    pub fn failed(status: Status) -> Self {
        Self {
            status,
            records: Vec::new(),
        }
    }
}

/// The four primitives a platform vault must provide.
///
/// Implementations must be safe to share across threads; the store
/// serializes calls per instance, but two stores may drive one backend
/// concurrently. Calls block until the underlying subsystem answers;
/// there is no cancellation and no timeout at this layer.
pub trait VaultBackend: Send + Sync {
    /// Insert a new entry described by `desc` (class, account, payload,
    /// accessibility, plus any scoping attributes). Inserting over an
    /// existing identity reports [`Status::DUPLICATE_ITEM`].
    fn insert(&self, desc: &Descriptor) -> Status;

    /// Look up the single entry matching `desc` and return its payload.
    fn query_one(&self, desc: &Descriptor) -> QueryReply;

    /// Delete the entry matching `desc`, or every entry in scope when
    /// the descriptor has no account. Reports
    /// [`Status::ITEM_NOT_FOUND`] when nothing matched.
    fn delete(&self, desc: &Descriptor) -> Status;

    /// List attribute records for every entry matching `desc`.
    fn enumerate(&self, desc: &Descriptor) -> EnumerateReply;

    /// Short name for diagnostics and error messages.
    fn name(&self) -> &'static str;
}
