//! OS keyring backend.
//!
//! Binds the vault primitives onto the operating system's credential
//! store via the `keyring` crate:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! The mapping is honest about what the cross-platform API can
//! express. The access group becomes the keyring service name (with a
//! crate default when none is configured) and the namespaced account
//! becomes the user. Accessibility and synchronizable attributes have
//! no counterpart here and are ignored — entries behave as
//! device-local, when-unlocked. Enumeration and account-less deletion
//! are not part of the API, so `enumerate` and scope-wide `delete`
//! report [`Status::UNSUPPORTED_OPERATION`] rather than pretending to
//! have swept a scope they cannot see.
//!
//! `set_secret` overwrites in place, so this backend never reports
//! [`Status::DUPLICATE_ITEM`].

use keyring::Entry;

use crate::status::Status;
use crate::vault::descriptor::Descriptor;

use super::{EnumerateReply, QueryReply, VaultBackend};

/// Service name used in the OS keyring when no access group is
/// configured.
const SERVICE_NAME: &str = "secretstore";

/// [`VaultBackend`] over the OS credential store.
pub struct KeyringVault;

impl KeyringVault {
    pub fn new() -> Self {
        Self
    }

    /// Build the keyring entry for a descriptor's account.
    fn entry(desc: &Descriptor, account: &str) -> Result<Entry, Status> {
        let service = desc.access_group.as_deref().unwrap_or(SERVICE_NAME);
        Entry::new(service, account).map_err(|e| map_status(&e))
    }
}

impl Default for KeyringVault {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a keyring error into the native status vocabulary.
fn map_status(err: &keyring::Error) -> Status {
    match err {
        keyring::Error::NoEntry => Status::ITEM_NOT_FOUND,
        keyring::Error::TooLong(_, _) | keyring::Error::Invalid(_, _) => {
            Status::INVALID_PARAMETER
        }
        _ => Status::NOT_AVAILABLE,
    }
}

impl VaultBackend for KeyringVault {
    fn insert(&self, desc: &Descriptor) -> Status {
        let (Some(account), Some(payload)) = (&desc.account, &desc.payload) else {
            return Status::INVALID_PARAMETER;
        };
        let entry = match Self::entry(desc, account) {
            Ok(entry) => entry,
            Err(status) => return status,
        };
        match entry.set_secret(payload) {
            Ok(()) => Status::SUCCESS,
            Err(e) => map_status(&e),
        }
    }

    fn query_one(&self, desc: &Descriptor) -> QueryReply {
        let Some(account) = &desc.account else {
            return QueryReply::failed(Status::INVALID_PARAMETER);
        };
        let entry = match Self::entry(desc, account) {
            Ok(entry) => entry,
            Err(status) => return QueryReply::failed(status),
        };
        match entry.get_secret() {
            Ok(payload) => QueryReply {
                status: Status::SUCCESS,
                payload: desc.return_data.then_some(payload),
            },
            Err(e) => QueryReply::failed(map_status(&e)),
        }
    }

    fn delete(&self, desc: &Descriptor) -> Status {
        // The keyring API deletes one credential at a time; a
        // scope-wide sweep cannot be expressed.
        let Some(account) = &desc.account else {
            return Status::UNSUPPORTED_OPERATION;
        };
        let entry = match Self::entry(desc, account) {
            Ok(entry) => entry,
            Err(status) => return status,
        };
        match entry.delete_credential() {
            Ok(()) => Status::SUCCESS,
            Err(e) => map_status(&e),
        }
    }

    fn enumerate(&self, _desc: &Descriptor) -> EnumerateReply {
        EnumerateReply::failed(Status::UNSUPPORTED_OPERATION)
    }

    fn name(&self) -> &'static str {
        "keyring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only the paths that never touch the OS credential store run
    // here; the full CRUD surface is exercised against `MemoryVault`.

    #[test]
    fn no_entry_maps_to_not_found() {
        assert_eq!(map_status(&keyring::Error::NoEntry), Status::ITEM_NOT_FOUND);
    }

    #[test]
    fn enumerate_is_unsupported() {
        let vault = KeyringVault::new();
        let reply = vault.enumerate(&Descriptor::enumerate());
        assert_eq!(reply.status, Status::UNSUPPORTED_OPERATION);
        assert!(reply.records.is_empty());
    }

    #[test]
    fn scope_wide_delete_is_unsupported() {
        let vault = KeyringVault::new();
        assert_eq!(
            vault.delete(&Descriptor::erase(None)),
            Status::UNSUPPORTED_OPERATION
        );
    }
}
