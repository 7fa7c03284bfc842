//! Dynamic cell values and rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// Rows are opaque to the table except through each leaf column's
/// [`CellType`](crate::CellType), so this enum only carries the shapes the
/// built-in cell types understand. Custom cell types are free to interpret
/// any variant.
///
/// # Shape Mapping
///
/// | JSON shape | Variant |
/// |------------|---------|
/// | `null` | `Null` |
/// | `true` | `Bool` |
/// | `42`, `1.5` | `Number` |
/// | `"text"` | `Text` |
/// | `{"text", "url"}` | `Link` |
/// | `{"number", "url"}` | `NumberLink` |
/// | `{"number", "html"}` | `NumberHtml` |
///
/// # Example
///
/// ```
/// use gridtable::CellValue;
///
/// let host = CellValue::from("broker-01");
/// let load = CellValue::from(0.75);
/// let link = CellValue::link("segments", "/segments?ds=wiki");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
    /// Text rendered as a hyperlink.
    Link { text: String, url: String },
    /// Number rendered as a hyperlink.
    NumberLink { number: f64, url: String },
    /// Number with caller-supplied markup for display.
    NumberHtml { number: f64, html: String },
}

/// One table row: a value per leaf column, positioned by leaf index.
pub type Row = Vec<CellValue>;

static NULL: CellValue = CellValue::Null;

/// Value at `column`, or null when the row is shorter than the column tree.
pub fn value_at(row: &[CellValue], column: usize) -> &CellValue {
    row.get(column).unwrap_or(&NULL)
}

impl CellValue {
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn number_link(number: f64, url: impl Into<String>) -> Self {
        Self::NumberLink {
            number,
            url: url.into(),
        }
    }

    pub fn number_html(number: f64, html: impl Into<String>) -> Self {
        Self::NumberHtml {
            number,
            html: html.into(),
        }
    }

    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// The numeric part of the value, if it has one.
    ///
    /// Text is parsed, so `"12"` counts as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n)
            | CellValue::NumberLink { number: n, .. }
            | CellValue::NumberHtml { number: n, .. } => Some(*n),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Link { text, .. } => text.trim().parse().ok(),
            CellValue::Null => None,
        }
    }

    /// The text part of the value, if it has one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) | CellValue::Link { text: s, .. } => Some(s),
            _ => None,
        }
    }

    /// Target of link-shaped values.
    pub fn url(&self) -> Option<&str> {
        match self {
            CellValue::Link { url, .. } | CellValue::NumberLink { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
            CellValue::Link { .. } => "link",
            CellValue::NumberLink { .. } => "number_link",
            CellValue::NumberHtml { .. } => "number_html",
        }
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Number(n) => fmt_number(*n, f),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Link { text, .. } => f.write_str(text),
            CellValue::NumberLink { number, .. } | CellValue::NumberHtml { number, .. } => {
                fmt_number(*number, f)
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Build a [`Row`] from heterogeneous values.
///
/// ```
/// use gridtable::row;
///
/// let r = row!["broker-01", 8082, 0.5];
/// assert_eq!(r.len(), 3);
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::CellValue::from($value)),*]
    };
}
