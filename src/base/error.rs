use thiserror::Error;

/// Error taxonomy for the consent core.
///
/// Storage failures are environmental, not programmer errors: the consent
/// store catches every variant below at the persistence boundary and
/// degrades to an in-memory-only session, so callers of the store API
/// never see them. Storage backends return them directly for callers that
/// drive a backend by hand.
#[derive(Debug, Error)]
pub enum ConsentError {
    #[error("Consent storage unavailable: {message}")]
    StorageUnavailable { message: String },
    #[error("Consent storage read failed: {message}")]
    StorageRead { message: String },
    #[error("Consent storage write failed: {message}")]
    StorageWrite { message: String },
    #[error("Malformed consent record: {message}")]
    MalformedRecord { message: String },
}

impl ConsentError {
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        ConsentError::StorageUnavailable {
            message: message.into(),
        }
    }

    pub fn storage_read(message: impl Into<String>) -> Self {
        ConsentError::StorageRead {
            message: message.into(),
        }
    }

    pub fn storage_write(message: impl Into<String>) -> Self {
        ConsentError::StorageWrite {
            message: message.into(),
        }
    }

    pub fn malformed_record(message: impl Into<String>) -> Self {
        ConsentError::MalformedRecord {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ConsentError {
    fn from(err: serde_json::Error) -> Self {
        ConsentError::malformed_record(err.to_string())
    }
}
