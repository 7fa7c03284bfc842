//! Render target handle.

use std::fmt;

use crate::error::ConfigurationError;

/// The host element a table renders into, named by its element id.
///
/// The rendered `<table>` carries this id, and every interactive cell id is
/// derived from it, so it must be usable as an HTML id: non-empty and free
/// of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Container {
    id: String,
}

impl Container {
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigurationError> {
        let id = id.into();
        let id = id.strip_prefix('#').map(str::to_string).unwrap_or(id);
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(ConfigurationError::InvalidContainer(id));
        }
        Ok(Self { id })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Element id of a leaf header cell.
    pub fn header_id(&self, column: usize) -> String {
        format!("{}-h{}", self.id, column)
    }

    /// Element id of a body row.
    pub fn row_id(&self, row: usize) -> String {
        format!("{}-r{}", self.id, row)
    }

    /// Element id of a body cell.
    pub fn cell_id(&self, row: usize, column: usize) -> String {
        format!("{}-r{}-c{}", self.id, row, column)
    }
}

impl TryFrom<&str> for Container {
    type Error = ConfigurationError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<String> for Container {
    type Error = ConfigurationError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}
