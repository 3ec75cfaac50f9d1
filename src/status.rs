//! Native vault status codes.
//!
//! Every backend primitive resolves to a single integer code in the
//! style of the platform trust subsystems this crate binds to: zero
//! means success, anything else is a failure the caller must interpret.
//! The well-known codes below cover the situations the store itself
//! distinguishes; backends are free to surface any other platform code
//! through [`Status`] unchanged.

use serde::{Deserialize, Serialize};

/// Result code of a single native vault call.
///
/// A thin newtype so backend codes travel through the error enum
/// without losing their exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(pub i32);

impl Status {
    /// The operation completed.
    pub const SUCCESS: Status = Status(0);

    /// No entry matched the descriptor.
    pub const ITEM_NOT_FOUND: Status = Status(-25_300);

    /// An entry with the same identity already exists.
    pub const DUPLICATE_ITEM: Status = Status(-25_299);

    /// The descriptor was malformed or carried an unusable attribute.
    pub const INVALID_PARAMETER: Status = Status(-50);

    /// The vault subsystem refused or could not service the call.
    pub const NOT_AVAILABLE: Status = Status(-25_291);

    /// The backend cannot express this operation at all.
    pub const UNSUPPORTED_OPERATION: Status = Status(-4);

    /// Retrieved bytes could not be decoded as text. Never produced by
    /// a backend; recorded by the store when UTF-8 decoding fails.
    pub const DECODE_FAILURE: Status = Status(-67_853);

    /// Whether this code reports success.
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// The raw platform code.
    pub fn code(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_zero() {
        assert!(Status::SUCCESS.is_success());
        assert_eq!(Status::SUCCESS.code(), 0);
    }

    #[test]
    fn failure_codes_are_not_success() {
        assert!(!Status::ITEM_NOT_FOUND.is_success());
        assert!(!Status::DECODE_FAILURE.is_success());
        assert!(!Status(1).is_success());
    }

    #[test]
    fn displays_raw_code() {
        assert_eq!(Status::ITEM_NOT_FOUND.to_string(), "-25300");
    }
}
