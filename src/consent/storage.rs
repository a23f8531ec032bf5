//! Consent-record persistence backends.
//!
//! The stored value is the JSON wire form of [`ConsentRecord`]; the key is
//! pinned to [`CONSENT_STORAGE_KEY`]. Backends report failures as
//! [`ConsentError`]; the consent store catches them all and degrades to an
//! in-memory session, so failures here never reach the UI.

use crate::base::error::ConsentError;
use crate::consent::record::CONSENT_STORAGE_KEY;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value persistence for the single consent record.
pub trait ConsentStorage {
    /// Read the stored record blob, `Ok(None)` when nothing is stored.
    fn read(&self) -> Result<Option<String>, ConsentError>;

    /// Persist the record blob, replacing any previous value.
    fn write(&self, value: &str) -> Result<(), ConsentError>;

    /// Remove the stored record; removing an absent record succeeds.
    fn remove(&self) -> Result<(), ConsentError>;
}

/// Session-lifetime storage: survives until the owning value is dropped.
/// The analogue of web session storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    value: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the storage with an existing blob (for simulating a prior
    /// session).
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(value.into())),
        }
    }
}

impl ConsentStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, ConsentError> {
        Ok(self.value.borrow().clone())
    }

    fn write(&self, value: &str) -> Result<(), ConsentError> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), ConsentError> {
        *self.value.borrow_mut() = None;
        Ok(())
    }
}

/// Durable storage backed by a single JSON file
/// (`<dir>/cf-consent-state.json`).
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{CONSENT_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConsentStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, ConsentError> {
        match fs::read_to_string(&self.path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConsentError::storage_read(e.to_string())),
        }
    }

    fn write(&self, value: &str) -> Result<(), ConsentError> {
        fs::write(&self.path, value).map_err(|e| ConsentError::storage_write(e.to_string()))
    }

    fn remove(&self) -> Result<(), ConsentError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ConsentError::storage_write(e.to_string())),
        }
    }
}

/// Two-tier storage: a session-lifetime front checked first, then a
/// durable back. A durable hit is backfilled into the front so later
/// reads in the same session stay cheap; writes and removes fan out to
/// both tiers.
pub struct LayeredStorage {
    session: Box<dyn ConsentStorage>,
    durable: Box<dyn ConsentStorage>,
}

impl LayeredStorage {
    pub fn new(session: Box<dyn ConsentStorage>, durable: Box<dyn ConsentStorage>) -> Self {
        Self { session, durable }
    }
}

impl ConsentStorage for LayeredStorage {
    fn read(&self) -> Result<Option<String>, ConsentError> {
        match self.session.read() {
            Ok(Some(value)) => return Ok(Some(value)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "session tier read failed, falling back to durable");
            }
        }

        let value = self.durable.read()?;
        if let Some(ref blob) = value {
            if let Err(e) = self.session.write(blob) {
                tracing::debug!(error = %e, "session tier backfill failed");
            }
        }
        Ok(value)
    }

    fn write(&self, value: &str) -> Result<(), ConsentError> {
        let session_result = self.session.write(value);
        let durable_result = self.durable.write(value);
        session_result.and(durable_result)
    }

    fn remove(&self) -> Result<(), ConsentError> {
        let session_result = self.session.remove();
        let durable_result = self.durable.remove();
        session_result.and(durable_result)
    }
}
