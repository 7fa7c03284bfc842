//! Dashboard files: a table described in JSON.

use std::path::Path;

use gridtable::{CellTypes, ColumnNode, ColumnSpec, Row, TableOptions};
use serde::Deserialize;

use crate::error::DemoError;

/// A dashboard file.
///
/// ```json
/// {
///   "container": "servers",
///   "options": {"caption": "Servers", "default_sort_column": 1},
///   "columns": [{"name": "Host", "selectable": true}, ...],
///   "rows": [["broker-01", 12], ...]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct Dashboard {
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default)]
    pub options: TableOptions,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

fn default_container() -> String {
    "gridtable".to_string()
}

impl Dashboard {
    pub async fn load(path: &Path) -> Result<Self, DemoError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DemoError::Read {
                path: path.display().to_string(),
                source,
            })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, DemoError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Column tree with cell types resolved from the built-in registry.
    pub fn tree(&self) -> Result<Vec<ColumnNode>, DemoError> {
        Ok(ColumnSpec::build_all(&self.columns, &CellTypes::new())?)
    }
}
