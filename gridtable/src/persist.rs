//! Persistence contract for sort and visibility state.
//!
//! The table never stores anything itself. An optional
//! [`PersistenceAdapter`] is asked for saved state once at construction and
//! told about every user-visible change afterwards. Adapters that can only
//! load asynchronously return `None` from [`PersistenceAdapter::load`] and
//! later deliver the state through the [`PersistenceHandle`] they were given.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock, Weak};

use serde::{Deserialize, Serialize};

use crate::sort::SortState;
use crate::state::{Table, TableId, TableInner};

/// The persisted part of a table's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Hidden flag per leaf.
    pub hidden: Vec<bool>,
    /// Active sort.
    pub sort: SortState,
}

/// External store for [`PersistedState`].
pub trait PersistenceAdapter: Send + Sync {
    /// Return saved state if it is available right away.
    ///
    /// Otherwise return `None` and call [`PersistenceHandle::apply`] once the
    /// state arrives. The handle may also be kept to request a save later.
    fn load(&self, handle: PersistenceHandle) -> Option<PersistedState>;

    /// Store the current state. Fire-and-forget.
    fn save(&self, state: &PersistedState);
}

/// Weak link from an adapter back to its table.
///
/// Holding a handle does not keep the table alive; every method reports
/// whether the table still existed.
#[derive(Clone)]
pub struct PersistenceHandle {
    pub(crate) inner: Weak<RwLock<TableInner>>,
    pub(crate) dirty: Arc<AtomicBool>,
    pub(crate) table: TableId,
}

impl PersistenceHandle {
    fn upgrade(&self) -> Option<Table> {
        Table::from_weak(self.table, &self.inner, &self.dirty)
    }

    /// Apply state that finished loading and re-render.
    pub fn apply(&self, state: PersistedState) -> bool {
        match self.upgrade() {
            Some(table) => {
                table.apply_persisted(state);
                true
            }
            None => false,
        }
    }

    /// Ask the table to push its current state to the adapter.
    pub fn request_save(&self) -> bool {
        match self.upgrade() {
            Some(table) => {
                table.save_state();
                true
            }
            None => false,
        }
    }

    /// Whether the table still exists.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl std::fmt::Debug for PersistenceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceHandle")
            .field("table", &self.table)
            .field("alive", &self.is_alive())
            .finish()
    }
}
