//! Accessibility policies for stored entries.
//!
//! The policy is fixed at write time and tells the platform vault when
//! it may release the entry's plaintext to this process, relative to
//! the device's lock state.  The `ThisDeviceOnly` variants additionally
//! exclude the entry from device backups and cross-device sync.

use serde::{Deserialize, Serialize};

/// When the vault will hand back an entry's plaintext.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    /// Readable only while the device is unlocked. The default, and the
    /// right choice for anything read in the foreground.
    #[default]
    WhenUnlocked,

    /// Readable any time after the first unlock since boot. Needed by
    /// background refresh paths that run while the device is locked.
    AfterFirstUnlock,

    /// `WhenUnlocked`, and never migrated to another device.
    WhenUnlockedThisDeviceOnly,

    /// `AfterFirstUnlock`, and never migrated to another device.
    AfterFirstUnlockThisDeviceOnly,

    /// Always readable. Provided for parity with legacy vault entries;
    /// prefer one of the stricter policies.
    Always,
}

impl Accessibility {
    /// Whether entries under this policy stay on the device they were
    /// written on (no backup restore, no sync).
    pub fn is_device_bound(self) -> bool {
        matches!(
            self,
            Self::WhenUnlockedThisDeviceOnly | Self::AfterFirstUnlockThisDeviceOnly
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn default_is_when_unlocked() {
        assert_eq!(Accessibility::default(), Accessibility::WhenUnlocked);
    }

    #[test_case(Accessibility::WhenUnlocked, false)]
    #[test_case(Accessibility::AfterFirstUnlock, false)]
    #[test_case(Accessibility::Always, false)]
    #[test_case(Accessibility::WhenUnlockedThisDeviceOnly, true)]
    #[test_case(Accessibility::AfterFirstUnlockThisDeviceOnly, true)]
    fn device_bound_variants(policy: Accessibility, expected: bool) {
        assert_eq!(policy.is_device_bound(), expected);
    }
}
