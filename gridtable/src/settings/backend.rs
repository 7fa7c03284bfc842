//! Settings backend trait.

use async_trait::async_trait;

use super::SettingsError;

/// Raw byte store behind a [`SettingsProvider`](super::SettingsProvider).
///
/// Keys are flat strings; namespacing is done by the provider.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// `None` when the key was never written or has been deleted.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Insert or overwrite.
    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), SettingsError>;

    /// Get all keys matching a prefix, sorted.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}
