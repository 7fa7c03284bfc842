//! Settings system for typed key-value storage.
//!
//! Backs the [`PersistenceAdapter`](crate::PersistenceAdapter) contract with
//! a real store: [`SettingsPersistence`] keeps each table's sort and hidden
//! columns under `gridtable.<name>`.

mod adapter;
mod backend;
mod file;
mod memory;

pub use adapter::{KEY_PREFIX, SettingsPersistence};
pub use backend::SettingsBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
    #[error("no tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Typed view over a [`SettingsBackend`].
///
/// Values are bincode-encoded. A provider may be scoped to a namespace, in
/// which case every key it is given is relative to that namespace.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
    namespace: String,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self::from_arc(Arc::new(backend))
    }

    /// Share a backend with other providers.
    pub fn from_arc(backend: Arc<dyn SettingsBackend>) -> Self {
        Self {
            backend,
            namespace: String::new(),
        }
    }

    /// A provider over the same backend whose keys live under `namespace`.
    pub fn scoped(&self, namespace: &str) -> Self {
        Self {
            backend: self.backend.clone(),
            namespace: format!("{}{}", self.namespace, namespace),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Backend key for a key relative to this provider.
    pub fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        let Some(bytes) = self.backend.get_bytes(&self.full_key(key)).await? else {
            return Ok(None);
        };
        bincode::deserialize(&bytes)
            .map(Some)
            .map_err(SettingsError::Deserialization)
    }

    /// Like [`get`](Self::get), with a fallback for missing keys.
    pub async fn get_or<T: DeserializeOwned>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, SettingsError> {
        Ok(self.get(key).await?.unwrap_or(default))
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.set_bytes(&self.full_key(key), bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.delete(&self.full_key(key)).await
    }

    /// Keys under this namespace starting with `prefix`, relative to the
    /// namespace.
    pub async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let keys = self.backend.keys_with_prefix(&self.full_key(prefix)).await?;
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(&self.namespace).map(str::to_string))
            .collect())
    }

    /// Every key under this namespace.
    pub async fn keys(&self) -> Result<Vec<String>, SettingsError> {
        self.keys_with_prefix("").await
    }
}

impl std::fmt::Debug for SettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsProvider")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
