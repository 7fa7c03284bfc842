//! Table options.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::value::Row;

/// Callback invoked with the row a user clicked.
pub type RowAction = Arc<dyn Fn(&Row) + Send + Sync>;

/// Construction options.
///
/// Plain fields deserialize from configuration; the row callback can only
/// be set in code.
///
/// # Example
///
/// ```
/// use gridtable::TableOptions;
///
/// let options = TableOptions::default()
///     .caption("Historicals")
///     .text_when_empty("No servers")
///     .default_sort(2, false);
/// assert_eq!(options.default_sort_column, 2);
/// ```
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Markup shown in place of the body when there are no rows.
    ///
    /// Default: `"No data"`
    pub text_when_empty: String,

    /// Leaf index sorted by initially.
    ///
    /// Default: 0
    pub default_sort_column: usize,

    /// Initial sort direction.
    ///
    /// Default: ascending
    pub default_sort_forward: bool,

    /// Table caption.
    pub caption: Option<String>,

    /// Whether sorting starts enabled. See [`Table::enable_sort`](crate::Table::enable_sort).
    ///
    /// Default: true
    pub sortable: bool,

    /// Invoked with the clicked row.
    #[serde(skip)]
    pub row_select_action: Option<RowAction>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            text_when_empty: "No data".to_string(),
            default_sort_column: 0,
            default_sort_forward: true,
            caption: None,
            sortable: true,
            row_select_action: None,
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text_when_empty(mut self, text: impl Into<String>) -> Self {
        self.text_when_empty = text.into();
        self
    }

    pub fn default_sort(mut self, column: usize, forward: bool) -> Self {
        self.default_sort_column = column;
        self.default_sort_forward = forward;
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn on_row_select(mut self, action: impl Fn(&Row) + Send + Sync + 'static) -> Self {
        self.row_select_action = Some(Arc::new(action));
        self
    }
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("text_when_empty", &self.text_when_empty)
            .field("default_sort_column", &self.default_sort_column)
            .field("default_sort_forward", &self.default_sort_forward)
            .field("caption", &self.caption)
            .field("sortable", &self.sortable)
            .field("row_select_action", &self.row_select_action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let options: TableOptions =
            serde_json::from_str(r#"{"caption": "Tasks", "default_sort_forward": false}"#).unwrap();
        assert_eq!(options.caption.as_deref(), Some("Tasks"));
        assert!(!options.default_sort_forward);
        assert_eq!(options.text_when_empty, "No data");
        assert!(options.sortable);
        assert!(options.row_select_action.is_none());
    }
}
