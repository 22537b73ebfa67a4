//! Authentication context - the credential pair shared by the HTTP client
//!
//! Replaces ambient token storage with an explicit handle that is injected
//! into the client. Cloning shares the same underlying pair.

use std::sync::{Arc, RwLock};

use crate::storage::{Storage, StoredCredentials};

#[derive(Clone, Debug, Default)]
pub struct AuthContext {
    inner: Arc<RwLock<StoredCredentials>>,
    storage: Option<Storage>,
}

impl AuthContext {
    /// In-memory context with no persistence
    pub fn new() -> Self {
        Self::default()
    }

    /// Context backed by the credential file, seeded from its contents
    pub fn persistent(storage: Storage) -> Self {
        let stored = storage.load_credentials();
        AuthContext {
            inner: Arc::new(RwLock::new(stored)),
            storage: Some(storage),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token
    }

    pub fn is_signed_in(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn set_tokens(&self, access: impl Into<String>, refresh: impl Into<String>) {
        let snapshot = {
            let mut creds = self.write();
            creds.access_token = Some(access.into());
            creds.refresh_token = Some(refresh.into());
            creds.clone()
        };
        self.persist(&snapshot);
    }

    /// Replace only the access token (after a refresh)
    pub fn set_access_token(&self, access: impl Into<String>) {
        let snapshot = {
            let mut creds = self.write();
            creds.access_token = Some(access.into());
            creds.clone()
        };
        self.persist(&snapshot);
    }

    pub fn clear(&self) {
        *self.write() = StoredCredentials::default();
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.clear_credentials() {
                tracing::warn!(error = %e, "Failed to remove credential file");
            }
        }
    }

    fn persist(&self, creds: &StoredCredentials) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.save_credentials(creds) {
                tracing::warn!(error = %e, "Failed to persist credentials");
            }
        }
    }

    fn read(&self) -> StoredCredentials {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoredCredentials> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
