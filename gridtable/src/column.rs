//! Column tree: leaf columns and header groups.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::cell::{CellType, CellTypes, Text};
use crate::error::ConfigurationError;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// CSS class applied to cells of a column with this alignment.
    pub fn class(self) -> &'static str {
        match self {
            Alignment::Left => "align-left",
            Alignment::Center => "align-center",
            Alignment::Right => "align-right",
        }
    }
}

/// Leaf column configuration.
///
/// Leaves hold the data: each one is bound to a position in every row. The
/// position is assigned when the table is built, in left-to-right order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use gridtable::{Alignment, Column, Number};
///
/// let columns = vec![
///     Column::new("Host"),
///     Column::new("Segments").cell_type(Arc::new(Number)).align(Alignment::Right),
///     Column::new("Tier").hideable().unsortable(),
/// ];
/// ```
#[derive(Clone)]
pub struct Column {
    /// Header text.
    pub name: String,
    /// Value semantics.
    pub cell_type: Arc<dyn CellType>,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Whether the column may be hidden.
    pub hideable: bool,
    /// Whether clicking a cell selects it.
    pub selectable: bool,
    /// Horizontal alignment.
    pub align: Alignment,
    /// Inline style applied to every cell of the column.
    pub style: String,
}

impl Column {
    /// Create a sortable text column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cell_type: Arc::new(Text),
            sortable: true,
            hideable: false,
            selectable: false,
            align: Alignment::Left,
            style: String::new(),
        }
    }

    pub fn cell_type(mut self, cell_type: Arc<dyn CellType>) -> Self {
        self.cell_type = cell_type;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Shorthand for `sortable(false)`.
    pub fn unsortable(self) -> Self {
        self.sortable(false)
    }

    pub fn hideable(mut self) -> Self {
        self.hideable = true;
        self
    }

    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("cell_type", &self.cell_type.name())
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("selectable", &self.selectable)
            .field("align", &self.align)
            .field("style", &self.style)
            .finish()
    }
}

/// A node of the column tree.
#[derive(Debug, Clone)]
pub enum ColumnNode {
    /// A data column.
    Leaf(Column),
    /// A header spanning its children. Must not be empty.
    Group {
        name: String,
        children: Vec<ColumnNode>,
    },
}

impl ColumnNode {
    pub fn leaf(column: Column) -> Self {
        ColumnNode::Leaf(column)
    }

    pub fn group(name: impl Into<String>, children: impl IntoIterator<Item = ColumnNode>) -> Self {
        ColumnNode::Group {
            name: name.into(),
            children: children.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ColumnNode::Leaf(column) => &column.name,
            ColumnNode::Group { name, .. } => name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ColumnNode::Leaf(_))
    }
}

impl From<Column> for ColumnNode {
    fn from(column: Column) -> Self {
        ColumnNode::Leaf(column)
    }
}

// -----------------------------------------------------------------------------
// Configuration form
// -----------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_type() -> String {
    "text".to_string()
}

/// Column tree as it appears in configuration files.
///
/// A node with `columns` is a group; anything else is a leaf whose `type`
/// names an entry in a [`CellTypes`] registry.
///
/// ```
/// use gridtable::{CellTypes, ColumnSpec};
///
/// let specs: Vec<ColumnSpec> = serde_json::from_str(r#"[
///     {"name": "Host"},
///     {"name": "Usage", "columns": [
///         {"name": "Segments", "type": "number", "align": "right"},
///         {"name": "Size", "type": "number", "hideable": true}
///     ]}
/// ]"#).unwrap();
/// let tree = ColumnSpec::build_all(&specs, &CellTypes::new()).unwrap();
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Group {
        name: String,
        columns: Vec<ColumnSpec>,
    },
    Leaf {
        name: String,
        #[serde(rename = "type", default = "default_type")]
        cell_type: String,
        #[serde(default = "default_true")]
        sorted: bool,
        #[serde(default)]
        hideable: bool,
        #[serde(default)]
        selectable: bool,
        #[serde(default)]
        align: Alignment,
        #[serde(default)]
        style: String,
    },
}

impl ColumnSpec {
    /// Resolve cell type names against `types` and build the tree node.
    pub fn build(&self, types: &CellTypes) -> Result<ColumnNode, ConfigurationError> {
        match self {
            ColumnSpec::Group { name, columns } => Ok(ColumnNode::Group {
                name: name.clone(),
                children: Self::build_all(columns, types)?,
            }),
            ColumnSpec::Leaf {
                name,
                cell_type,
                sorted,
                hideable,
                selectable,
                align,
                style,
            } => {
                let resolved = types.get(cell_type).ok_or_else(|| {
                    ConfigurationError::UnknownCellType {
                        column: name.clone(),
                        cell_type: cell_type.clone(),
                    }
                })?;
                Ok(ColumnNode::Leaf(Column {
                    name: name.clone(),
                    cell_type: resolved,
                    sortable: *sorted,
                    hideable: *hideable,
                    selectable: *selectable,
                    align: *align,
                    style: style.clone(),
                }))
            }
        }
    }

    pub fn build_all(
        specs: &[ColumnSpec],
        types: &CellTypes,
    ) -> Result<Vec<ColumnNode>, ConfigurationError> {
        specs.iter().map(|spec| spec.build(types)).collect()
    }
}
