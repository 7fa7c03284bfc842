//! Settings-backed persistence adapter.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::{SettingsError, SettingsProvider};
use crate::persist::{PersistedState, PersistenceAdapter, PersistenceHandle};

/// Prefix of every key written by [`SettingsPersistence`].
pub const KEY_PREFIX: &str = "gridtable.";

/// Stores one table's [`PersistedState`] in a [`SettingsProvider`].
///
/// The table talks to its adapter synchronously, so this adapter keeps the
/// last known state in memory and moves all backend I/O onto tasks of the
/// runtime it was created on:
///
/// - `load` answers from the cache when it is warm. Otherwise it returns
///   `None` and delivers the stored state through the handle once read.
/// - `save` updates the cache and writes in the background. Writes are
///   sequenced so an older state never overwrites a newer one.
///
/// Call [`flush`](Self::flush) before shutdown to wait for pending writes.
pub struct SettingsPersistence {
    /// Scoped to [`KEY_PREFIX`].
    provider: SettingsProvider,
    name: String,
    /// Full backend key, for logs.
    key: String,
    runtime: Handle,
    cache: Arc<RwLock<Option<PersistedState>>>,
    /// Set once `save` ran; a late load must not clobber newer state.
    saved: Arc<AtomicBool>,
    seq: AtomicU64,
    written: Arc<tokio::sync::Mutex<u64>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl SettingsPersistence {
    /// Create an adapter for table `name` on the current tokio runtime.
    pub fn new(provider: SettingsProvider, name: &str) -> Result<Self, SettingsError> {
        Ok(Self::with_runtime(provider, name, Handle::try_current()?))
    }

    /// Create an adapter that spawns its I/O on `runtime`.
    pub fn with_runtime(provider: SettingsProvider, name: &str, runtime: Handle) -> Self {
        let provider = provider.scoped(KEY_PREFIX);
        Self {
            key: provider.full_key(name),
            name: name.to_string(),
            provider,
            runtime,
            cache: Arc::new(RwLock::new(None)),
            saved: Arc::new(AtomicBool::new(false)),
            seq: AtomicU64::new(0),
            written: Arc::new(tokio::sync::Mutex::new(0)),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Settings key this adapter reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last known state, if any.
    pub fn cached(&self) -> Option<PersistedState> {
        self.cache.read().ok().and_then(|g| g.clone())
    }

    /// Read the stored state into the cache, so the next `load` answers
    /// synchronously.
    pub async fn preload(&self) -> Result<Option<PersistedState>, SettingsError> {
        let state = self.provider.get::<PersistedState>(&self.name).await?;
        if let Some(state) = &state
            && !self.saved.load(Ordering::SeqCst)
            && let Ok(mut cache) = self.cache.write()
        {
            *cache = Some(state.clone());
        }
        Ok(state)
    }

    /// Forget the stored state.
    pub async fn clear(&self) -> Result<(), SettingsError> {
        if let Ok(mut cache) = self.cache.write() {
            *cache = None;
        }
        self.provider.delete(&self.name).await
    }

    /// Wait for every background read and write started so far.
    pub async fn flush(&self) {
        loop {
            let tasks = self
                .pending
                .lock()
                .map(|mut g| std::mem::take(&mut *g))
                .unwrap_or_default();
            if tasks.is_empty() {
                return;
            }
            for task in tasks {
                if let Err(e) = task.await {
                    log::warn!("settings task for {} failed: {e}", self.key);
                }
            }
        }
    }

    /// Names of all tables with stored state.
    pub async fn stored_tables(provider: &SettingsProvider) -> Result<Vec<String>, SettingsError> {
        provider.scoped(KEY_PREFIX).keys().await
    }

    fn track(&self, task: JoinHandle<()>) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|t| !t.is_finished());
            pending.push(task);
        }
    }
}

impl PersistenceAdapter for SettingsPersistence {
    fn load(&self, handle: PersistenceHandle) -> Option<PersistedState> {
        if let Some(state) = self.cached() {
            return Some(state);
        }

        let provider = self.provider.clone();
        let name = self.name.clone();
        let key = self.key.clone();
        let cache = self.cache.clone();
        let saved = self.saved.clone();
        let task = self.runtime.spawn(async move {
            let state = match provider.get::<PersistedState>(&name).await {
                Ok(Some(state)) => state,
                Ok(None) => return,
                Err(e) => {
                    log::warn!("failed to load {key}: {e}");
                    return;
                }
            };
            // The user changed something while we were reading
            if saved.load(Ordering::SeqCst) {
                log::debug!("discarding stale {key}");
                return;
            }
            if let Ok(mut cache) = cache.write() {
                *cache = Some(state.clone());
            }
            if !handle.apply(state) {
                log::debug!("table for {key} dropped before its state loaded");
            }
        });
        self.track(task);
        None
    }

    fn save(&self, state: &PersistedState) {
        self.saved.store(true, Ordering::SeqCst);
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(state.clone());
        }

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let provider = self.provider.clone();
        let name = self.name.clone();
        let key = self.key.clone();
        let written = self.written.clone();
        let state = state.clone();
        let task = self.runtime.spawn(async move {
            let mut last = written.lock().await;
            if seq < *last {
                return;
            }
            match provider.set(&name, &state).await {
                Ok(()) => *last = seq,
                Err(e) => log::warn!("failed to save {key}: {e}"),
            }
        });
        self.track(task);
    }
}

impl std::fmt::Debug for SettingsPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsPersistence")
            .field("key", &self.key)
            .field("cached", &self.cached())
            .finish()
    }
}
