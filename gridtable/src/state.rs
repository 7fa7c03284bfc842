//! Table state and public operations.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use htmldom::Element;

use crate::cell::CellType;
use crate::column::ColumnNode;
use crate::container::Container;
use crate::error::ConfigurationError;
use crate::layout::HeaderLayout;
use crate::options::TableOptions;
use crate::persist::{PersistedState, PersistenceAdapter, PersistenceHandle};
use crate::render;
use crate::selection::Selection;
use crate::sort::{SortState, sort_rows};
use crate::value::{CellValue, Row, value_at};
use crate::visibility::{Visibility, VisibilityCommand};

/// Unique identifier for a Table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__gridtable_{}", self.0)
    }
}

/// Per-leaf entry of [`Table::header_info`], for building column toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub index: usize,
    pub name: String,
    pub hideable: bool,
    pub hidden: bool,
}

/// Internal state for a table.
pub(crate) struct TableInner {
    pub container: Container,
    /// Computed once at construction.
    pub layout: HeaderLayout,
    pub options: TableOptions,
    /// Current rows, in display order after the last render.
    pub rows: Vec<Row>,
    pub sort: SortState,
    /// Global sort switch.
    pub sort_enabled: bool,
    pub visibility: Visibility,
    pub selection: Selection,
    /// Placeholder set by `erase`, shown instead of the configured text.
    pub placeholder: Option<String>,
    pub persistence: Option<Arc<dyn PersistenceAdapter>>,
    /// Output of the last render.
    pub markup: Option<Element>,
    /// Bumped whenever a render starts.
    pub generation: u64,
}

impl TableInner {
    fn persisted(&self) -> PersistedState {
        PersistedState {
            hidden: self.visibility.flags().to_vec(),
            sort: self.sort,
        }
    }

    fn apply_persisted(&mut self, state: &PersistedState) {
        self.visibility.restore(self.layout.leaves(), &state.hidden);
        self.sort = state.sort;
    }

    pub fn placeholder_text(&self) -> &str {
        self.placeholder
            .as_deref()
            .unwrap_or(&self.options.text_when_empty)
    }
}

/// A hierarchical table.
///
/// `Table` is a cheap handle; clones share the same state. Every operation
/// runs to completion synchronously and finishes with a full re-render,
/// whose output is available from [`markup`](Table::markup) and
/// [`to_html`](Table::to_html).
///
/// - Nested column headers laid out once at construction
/// - Per-column value semantics through [`CellType`]
/// - Header-click sorting
/// - Hideable columns that keep the grid intact
/// - A selected row that survives reloads by value
/// - Optional persistence of sort and hidden columns
#[derive(Clone)]
pub struct Table {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    pub(crate) inner: Arc<RwLock<TableInner>>,
    /// Set on every re-render, cleared by `take_dirty`.
    pub(crate) dirty: Arc<AtomicBool>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("rows", &self.len())
            .field("sort", &self.sort_state())
            .finish()
    }
}

impl Table {
    /// Build a table and render it once.
    ///
    /// Fails only on configuration problems: a container id that cannot be
    /// used, an empty column group, or a tree without leaves.
    pub fn build(
        container: &str,
        tree: Vec<ColumnNode>,
        rows: Vec<Row>,
        options: TableOptions,
        persistence: Option<Arc<dyn PersistenceAdapter>>,
    ) -> Result<Self, ConfigurationError> {
        let container = Container::new(container)?;
        let layout = HeaderLayout::new(&tree)?;

        let mut selection = Selection::new();
        selection.select_first(&rows);

        let inner = TableInner {
            container,
            visibility: Visibility::new(layout.width()),
            layout,
            sort: SortState::new(options.default_sort_column, options.default_sort_forward),
            sort_enabled: options.sortable,
            options,
            rows,
            selection,
            placeholder: None,
            persistence: persistence.clone(),
            markup: None,
            generation: 0,
        };

        let table = Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(false)),
        };

        if let Some(adapter) = persistence
            && let Some(state) = adapter.load(table.persistence_handle())
        {
            log::debug!("{}: restored cached state {:?}", table.id, state);
            if let Ok(mut guard) = table.inner.write() {
                guard.apply_persisted(&state);
            }
        }

        table.refresh();
        Ok(table)
    }

    /// Start a [`TableBuilder`].
    pub fn builder(container: impl Into<String>, tree: Vec<ColumnNode>) -> TableBuilder {
        TableBuilder {
            container: container.into(),
            tree,
            rows: Vec::new(),
            options: TableOptions::default(),
            persistence: None,
        }
    }

    pub(crate) fn from_weak(
        id: TableId,
        inner: &Weak<RwLock<TableInner>>,
        dirty: &Arc<AtomicBool>,
    ) -> Option<Self> {
        inner.upgrade().map(|inner| Self {
            id,
            inner,
            dirty: dirty.clone(),
        })
    }

    fn persistence_handle(&self) -> PersistenceHandle {
        PersistenceHandle {
            inner: Arc::downgrade(&self.inner),
            dirty: self.dirty.clone(),
            table: self.id,
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Element id of the container the table renders into.
    pub fn container_id(&self) -> String {
        self.inner
            .read()
            .map(|g| g.container.id().to_string())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Sort, render, run `after_render` hooks and store the result.
    pub(crate) fn refresh(&self) {
        let (mut root, hooks, generation) = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            let inner = &mut *guard;

            if let Some(order) = sort_rows(
                &mut inner.rows,
                inner.layout.leaves(),
                inner.sort,
                inner.sort_enabled,
            ) {
                inner.selection.remap(&order);
            }

            inner.generation += 1;
            let root = render::render_table(inner);
            let hooks: Vec<(usize, Arc<dyn CellType>)> = inner
                .layout
                .leaves()
                .iter()
                .filter(|leaf| !inner.visibility.is_hidden(leaf.index))
                .map(|leaf| (leaf.index, leaf.column.cell_type.clone()))
                .collect();
            (root, hooks, inner.generation)
        };

        // Hooks run without the lock so they may call back into the table.
        for (column, cell_type) in hooks {
            cell_type.after_render(column, &mut root);
        }

        if let Ok(mut guard) = self.inner.write() {
            // A hook that changed the table already stored a newer render
            if guard.generation != generation {
                log::trace!("{}: dropping superseded render {}", self.id, generation);
                return;
            }
            log::trace!("{}: rendered {} rows", self.id, guard.rows.len());
            guard.markup = Some(root);
        }
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Output of the last render.
    pub fn markup(&self) -> Option<Element> {
        self.inner.read().ok().and_then(|g| g.markup.clone())
    }

    /// Last render serialized to HTML.
    pub fn to_html(&self) -> String {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.markup.as_ref().map(htmldom::to_html))
            .unwrap_or_default()
    }

    /// Whether the table re-rendered since the last call.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// The computed header layout.
    pub fn layout(&self) -> Option<HeaderLayout> {
        self.inner.read().ok().map(|g| g.layout.clone())
    }

    /// Number of leaf columns.
    pub fn width(&self) -> usize {
        self.inner.read().map(|g| g.layout.width()).unwrap_or(0)
    }

    /// Number of header rows.
    pub fn header_height(&self) -> usize {
        self.inner.read().map(|g| g.layout.height()).unwrap_or(0)
    }

    /// Per-leaf name and visibility, in leaf order.
    pub fn header_info(&self) -> Vec<HeaderInfo> {
        self.inner
            .read()
            .map(|g| {
                g.layout
                    .leaves()
                    .iter()
                    .map(|leaf| HeaderInfo {
                        index: leaf.index,
                        name: leaf.column.name.clone(),
                        hideable: leaf.column.hideable,
                        hidden: g.visibility.is_hidden(leaf.index),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Replace all rows and re-render.
    ///
    /// With `keep_selection` the previously selected row is looked up again
    /// by value; otherwise the first row is selected.
    pub fn load(&self, rows: Vec<Row>, keep_selection: bool) {
        if let Ok(mut guard) = self.inner.write() {
            let inner = &mut *guard;
            log::debug!(
                "{}: loading {} rows (keep selection: {})",
                self.id,
                rows.len(),
                keep_selection
            );
            inner.rows = rows;
            if !inner.rows.is_empty() {
                inner.placeholder = None;
            }
            if keep_selection && inner.selection.key().is_some() {
                let found = inner.selection.reconcile(&inner.rows, inner.layout.leaves());
                if !found {
                    log::debug!("{}: selected row not found after reload", self.id);
                }
            } else {
                inner.selection.select_first(&inner.rows);
            }
        }
        self.refresh();
    }

    /// Drop all rows, optionally replacing the empty-state text until the
    /// next non-empty load.
    pub fn erase(&self, placeholder: Option<&str>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows.clear();
            guard.selection.clear();
            guard.placeholder = placeholder.map(str::to_string);
        }
        self.refresh();
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by display position.
    pub fn row(&self, index: usize) -> Option<Row> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.rows.get(index).cloned())
    }

    /// All rows in display order.
    pub fn rows(&self) -> Vec<Row> {
        self.inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort_state(&self) -> SortState {
        self.inner.read().map(|g| g.sort).unwrap_or_default()
    }

    pub fn is_sort_enabled(&self) -> bool {
        self.inner.read().map(|g| g.sort_enabled).unwrap_or(false)
    }

    /// Switch sorting on or off for this table and re-render.
    pub fn enable_sort(&self, enabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.sort_enabled = enabled;
        }
        self.refresh();
    }

    /// Header click on leaf `column`. Returns whether the sort changed.
    pub(crate) fn toggle_sort(&self, column: usize) -> bool {
        let changed = self
            .inner
            .write()
            .map(|mut g| {
                let sortable = g.layout.leaf(column).is_some_and(|l| l.column.sortable);
                if !g.sort_enabled || !sortable {
                    log::debug!("{}: ignoring sort on column {}", self.id, column);
                    return false;
                }
                g.sort.toggle(column);
                true
            })
            .unwrap_or(false);

        if changed {
            self.refresh();
            self.save_state();
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    /// Re-render, after applying a visibility command if one is given.
    ///
    /// Commands on fixed or unknown columns are ignored. A command that
    /// changes anything is saved through the persistence adapter.
    pub fn display(&self, command: Option<VisibilityCommand>) {
        let changed = match command {
            Some(command) => self
                .inner
                .write()
                .map(|mut g| {
                    let inner = &mut *g;
                    inner.visibility.apply(inner.layout.leaves(), command)
                })
                .unwrap_or(false),
            None => false,
        };

        self.refresh();
        if changed {
            self.save_state();
        }
    }

    /// Hidden flag per leaf.
    pub fn hidden_flags(&self) -> Vec<bool> {
        self.inner
            .read()
            .map(|g| g.visibility.flags().to_vec())
            .unwrap_or_default()
    }

    pub fn is_hidden(&self, column: usize) -> bool {
        self.inner
            .read()
            .map(|g| g.visibility.is_hidden(column))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Position of the selected row.
    pub fn selected_index(&self) -> Option<usize> {
        self.inner.read().ok().and_then(|g| g.selection.row())
    }

    /// The selected row.
    pub fn selected_row(&self) -> Option<Row> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.selection.row().and_then(|i| g.rows.get(i).cloned()))
    }

    /// Key column and value the selection is re-resolved by.
    pub fn selection_key(&self) -> Option<(usize, CellValue)> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.selection.key().map(|(c, v)| (c, v.clone())))
    }

    /// Select the first row whose value in `column` equals `value`.
    ///
    /// Unknown or non-selectable columns are ignored. No matching row clears
    /// the selection.
    pub fn select(&self, column: usize, value: impl Into<CellValue>) {
        let value = value.into();
        let applied = self
            .inner
            .write()
            .map(|mut g| {
                let inner = &mut *g;
                let selectable = inner
                    .layout
                    .leaf(column)
                    .is_some_and(|l| l.column.selectable);
                if !selectable {
                    log::debug!("{}: ignoring select on column {}", self.id, column);
                    return false;
                }
                match Selection::find(&inner.rows, inner.layout.leaves(), column, &value) {
                    Some(row) => inner.selection.select_row(&inner.rows, row, column),
                    None => inner.selection.clear(),
                }
                true
            })
            .unwrap_or(false);

        if applied {
            self.refresh();
        }
    }

    /// Row click at display position `row` on leaf `column`.
    ///
    /// Returns false when the row does not exist.
    pub(crate) fn click_row(&self, row: usize, column: usize) -> bool {
        let clicked = self
            .inner
            .write()
            .ok()
            .and_then(|mut g| {
                let inner = &mut *g;
                let values = inner.rows.get(row)?.clone();
                let leaf = inner.layout.leaf(column).filter(|l| l.column.selectable);
                let on_select = leaf.map(|l| l.column.cell_type.clone());
                let key_column = if on_select.is_some() {
                    column
                } else {
                    inner.selection.column()
                };
                inner.selection.select_row(&inner.rows, row, key_column);
                Some((values, on_select, inner.options.row_select_action.clone()))
            });

        let Some((values, on_select, action)) = clicked else {
            return false;
        };

        self.refresh();
        if let Some(cell_type) = on_select {
            cell_type.on_select(value_at(&values, column));
        }
        if let Some(action) = action {
            action(&values);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Current `{hidden, sort}` state.
    pub fn persisted_state(&self) -> Option<PersistedState> {
        self.inner.read().ok().map(|g| g.persisted())
    }

    pub(crate) fn apply_persisted(&self, state: PersistedState) {
        if let Ok(mut guard) = self.inner.write() {
            log::debug!("{}: applying loaded state {:?}", self.id, state);
            guard.apply_persisted(&state);
        }
        self.refresh();
    }

    /// Push the current state to the persistence adapter, if any.
    pub(crate) fn save_state(&self) {
        let pending = self
            .inner
            .read()
            .ok()
            .and_then(|g| g.persistence.clone().map(|p| (p, g.persisted())));
        if let Some((adapter, state)) = pending {
            adapter.save(&state);
        }
    }
}

/// Step-by-step construction of a [`Table`].
///
/// ```
/// use gridtable::{Column, ColumnNode, Table, TableOptions, row};
///
/// let table = Table::builder("servers", vec![ColumnNode::leaf(Column::new("Host"))])
///     .rows(vec![row!["broker-01"], row!["historical-07"]])
///     .options(TableOptions::default().caption("Servers"))
///     .build()
///     .unwrap();
/// assert_eq!(table.len(), 2);
/// ```
pub struct TableBuilder {
    container: String,
    tree: Vec<ColumnNode>,
    rows: Vec<Row>,
    options: TableOptions,
    persistence: Option<Arc<dyn PersistenceAdapter>>,
}

impl TableBuilder {
    pub fn rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn persistence(mut self, adapter: Arc<dyn PersistenceAdapter>) -> Self {
        self.persistence = Some(adapter);
        self
    }

    pub fn build(self) -> Result<Table, ConfigurationError> {
        Table::build(
            &self.container,
            self.tree,
            self.rows,
            self.options,
            self.persistence,
        )
    }
}
