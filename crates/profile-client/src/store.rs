//! Credential persistence.
//!
//! One named slot holds the API credential as plain text, mirroring the
//! browser's local-storage slot it replaces. The slot is read on every
//! request and carries no expiry. Consumers depend on the [`CredentialStore`]
//! trait, never on the file layout.

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use credential::ApiCredential;

/// Errors raised by credential slot implementations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    /// Reading or writing the slot failed.
    #[error("credential slot {path} is inaccessible: {source}")]
    Io {
        /// Path of the slot that failed.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
}

/// Persistent slot holding the user's API credential.
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential, if any.
    ///
    /// A blank or missing slot reads as `None`, never as an error.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Io`] when the slot exists but cannot
    /// be read.
    fn load(&self) -> Result<Option<ApiCredential>, CredentialStoreError>;

    /// Overwrite the slot with a new credential.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Io`] when the slot cannot be written.
    fn save(&self, token: &ApiCredential) -> Result<(), CredentialStoreError>;

    /// Empty the slot. Clearing an already-empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Io`] when the slot cannot be removed.
    fn clear(&self) -> Result<(), CredentialStoreError>;
}

/// File-backed credential slot.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Use `path` as the credential slot.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> CredentialStoreError {
        CredentialStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<ApiCredential>, CredentialStoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(read_error) if read_error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(read_error) => return Err(self.io_error(read_error)),
        };
        // A blank slot is indistinguishable from an absent one.
        Ok(ApiCredential::new(contents).ok())
    }

    fn save(&self, token: &ApiCredential) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|dir_error| self.io_error(dir_error))?;
        }
        std::fs::write(&self.path, format!("{}\n", token.expose()))
            .map_err(|write_error| self.io_error(write_error))
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(remove_error) if remove_error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(remove_error) => Err(self.io_error(remove_error)),
        }
    }
}

/// In-memory slot for tests and embedding without a filesystem.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    slot: Mutex<Option<ApiCredential>>,
}

impl InMemoryCredentialStore {
    /// Empty in-memory slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-loaded with `token`.
    #[must_use]
    pub fn holding(token: ApiCredential) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<ApiCredential>, CredentialStoreError> {
        Ok(self.slot.lock().map(|guard| guard.clone()).unwrap_or_default())
    }

    fn save(&self, token: &ApiCredential) -> Result<(), CredentialStoreError> {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = Some(token.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = None;
        }
        Ok(())
    }
}
