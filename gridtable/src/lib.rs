//! Hierarchical table widget.
//!
//! A [`Table`] renders rows of [`CellValue`]s under a tree of nested column
//! headers into an [`htmldom::Element`] tree. It sorts on header clicks,
//! hides columns without breaking the grid, keeps the selected row across
//! reloads and can persist sort and visibility through a
//! [`PersistenceAdapter`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gridtable::{Column, ColumnNode, Number, Table, TableOptions, row};
//!
//! let tree = vec![
//!     ColumnNode::leaf(Column::new("Host").selectable()),
//!     ColumnNode::group("Load", [
//!         ColumnNode::leaf(Column::new("Segments").cell_type(Arc::new(Number))),
//!         ColumnNode::leaf(Column::new("Size").cell_type(Arc::new(Number)).hideable()),
//!     ]),
//! ];
//! let table = Table::build(
//!     "servers",
//!     tree,
//!     vec![row!["b", 10, 5], row!["a", 3, 7]],
//!     TableOptions::default(),
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(table.header_height(), 2);
//! assert_eq!(table.rows()[0][0].to_string(), "a");
//! assert!(table.to_html().starts_with("<table id=\"servers\""));
//! ```

pub mod cell;
pub mod column;
pub mod container;
pub mod error;
pub mod events;
pub mod layout;
pub mod options;
pub mod persist;
pub mod render;
pub mod selection;
pub mod settings;
pub mod sort;
pub mod state;
pub mod value;
pub mod visibility;

pub use cell::{CellType, CellTypes, CustomCell, Number, NumberHtml, NumberLink, Text, TextLink};
pub use column::{Alignment, Column, ColumnNode, ColumnSpec};
pub use container::Container;
pub use error::ConfigurationError;
pub use events::{EventResult, TableEvent};
pub use layout::{HeaderCell, HeaderLayout, LeafMeta};
pub use options::{RowAction, TableOptions};
pub use persist::{PersistedState, PersistenceAdapter, PersistenceHandle};
pub use selection::Selection;
pub use sort::{SortIndicator, SortState};
pub use state::{HeaderInfo, Table, TableBuilder, TableId};
pub use value::{CellValue, Row};
pub use visibility::{Visibility, VisibilityCommand};

