use thiserror::Error;

use crate::status::Status;

/// All errors that can occur in SecretStore.
///
/// Every variant maps back to the native status code of the vault call
/// that produced it via [`SecretStoreError::status`], so callers that
/// need the raw platform code still get it — attached to the result of
/// the operation itself rather than read from a shared diagnostic field.
#[derive(Debug, Error)]
pub enum SecretStoreError {
    // --- Lookup errors ---
    #[error("Secret '{0}' not found")]
    NotFound(String),

    // --- Vault errors ---
    #[error("Vault call failed with status {0}")]
    Vault(Status),

    #[error("Operation not supported by the '{backend}' backend")]
    Unsupported { backend: &'static str },

    // --- Payload errors ---
    #[error("Stored bytes for '{0}' are not valid UTF-8")]
    Decoding(String),
}

impl SecretStoreError {
    /// The native status code behind this error.
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound(_) => Status::ITEM_NOT_FOUND,
            Self::Vault(status) => *status,
            Self::Unsupported { .. } => Status::UNSUPPORTED_OPERATION,
            Self::Decoding(_) => Status::DECODE_FAILURE,
        }
    }
}

/// Convenience type alias for SecretStore results.
pub type Result<T> = std::result::Result<T, SecretStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_reports_its_status() {
        assert_eq!(
            SecretStoreError::NotFound("k".into()).status(),
            Status::ITEM_NOT_FOUND
        );
        assert_eq!(
            SecretStoreError::Vault(Status::NOT_AVAILABLE).status(),
            Status::NOT_AVAILABLE
        );
        assert_eq!(
            SecretStoreError::Decoding("k".into()).status(),
            Status::DECODE_FAILURE
        );
    }

    #[test]
    fn messages_name_the_key() {
        let err = SecretStoreError::NotFound("auth".into());
        assert!(err.to_string().contains("auth"));
    }
}
