//! Pluggable value semantics for leaf columns.
//!
//! Every leaf column owns one [`CellType`] which decides how a value is
//! rendered, how two values compare for sorting and selection matching, and
//! which side effects run after a render or when a cell is selected.
//!
//! Built-in types cover plain text, numbers, and the three link/markup
//! shapes of [`CellValue`]. [`CustomCell`] lets callers override any subset
//! of the behaviour with closures; anything left out falls back to the text
//! defaults.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gridtable::{CellType, CellTypes, CustomCell, CellValue};
//! use htmldom::Content;
//!
//! let mut types = CellTypes::new();
//! types.register(
//!     "percent",
//!     Arc::new(
//!         CustomCell::new("percent")
//!             .render(|v| Content::Text(format!("{}%", v)))
//!             .compare(|a, b| gridtable::cell::compare_numbers(a, b)),
//!     ),
//! );
//! let percent = types.get("percent").unwrap();
//! assert_eq!(percent.render(&CellValue::from(40)), Content::Text("40%".into()));
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use htmldom::{Content, Element};

use crate::value::CellValue;

/// Value semantics for one leaf column.
///
/// All methods have defaults matching the plain text type, so an
/// implementation only overrides what differs.
pub trait CellType: Send + Sync {
    /// Short name used in logs and for registry lookups.
    fn name(&self) -> &str {
        "text"
    }

    /// Render a value into cell content.
    fn render(&self, value: &CellValue) -> Content {
        Content::Text(value.to_string())
    }

    /// Compare two values for sorting and selection matching.
    fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        compare_text(a, b)
    }

    /// Post-process the freshly rendered table.
    ///
    /// Called once per full re-render for each visible leaf using this type.
    fn after_render(&self, _column: usize, _table: &mut Element) {}

    /// Side effect when a cell of this type is selected by a click.
    fn on_select(&self, _value: &CellValue) {}
}

impl fmt::Debug for dyn CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellType({})", self.name())
    }
}

/// Lexicographic comparison of the display strings.
pub fn compare_text(a: &CellValue, b: &CellValue) -> Ordering {
    a.to_string().cmp(&b.to_string())
}

/// Numeric comparison. Values without a numeric part sort before all
/// numbers and compare as text among themselves.
pub fn compare_numbers(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => compare_text(a, b),
    }
}

// -----------------------------------------------------------------------------
// Built-in types
// -----------------------------------------------------------------------------

/// Plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl CellType for Text {}

/// Numeric values, rendered as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Number;

impl CellType for Number {
    fn name(&self) -> &str {
        "number"
    }

    fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        compare_numbers(a, b)
    }
}

/// `{text, url}` values rendered as a hyperlink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLink;

impl CellType for TextLink {
    fn name(&self) -> &str {
        "text_url"
    }

    fn render(&self, value: &CellValue) -> Content {
        match value {
            CellValue::Link { text, url } => Element::link(text.as_str(), url.as_str()).into(),
            other => Content::Text(other.to_string()),
        }
    }

    fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        let a = a.as_text().map(str::to_string).unwrap_or_else(|| a.to_string());
        let b = b.as_text().map(str::to_string).unwrap_or_else(|| b.to_string());
        a.cmp(&b)
    }
}

/// `{number, url}` values rendered as a hyperlink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberLink;

impl CellType for NumberLink {
    fn name(&self) -> &str {
        "number_url"
    }

    fn render(&self, value: &CellValue) -> Content {
        match value {
            CellValue::NumberLink { url, .. } => {
                Element::link(value.to_string(), url.as_str()).into()
            }
            other => Content::Text(other.to_string()),
        }
    }

    fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        compare_numbers(a, b)
    }
}

/// `{number, html}` values. The markup is trusted and emitted verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberHtml;

impl CellType for NumberHtml {
    fn name(&self) -> &str {
        "number_html"
    }

    fn render(&self, value: &CellValue) -> Content {
        match value {
            CellValue::NumberHtml { html, .. } => Content::Html(html.clone()),
            other => Content::Text(other.to_string()),
        }
    }

    fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        compare_numbers(a, b)
    }
}

// -----------------------------------------------------------------------------
// Custom type
// -----------------------------------------------------------------------------

type RenderFn = Arc<dyn Fn(&CellValue) -> Content + Send + Sync>;
type CompareFn = Arc<dyn Fn(&CellValue, &CellValue) -> Ordering + Send + Sync>;
type AfterRenderFn = Arc<dyn Fn(usize, &mut Element) + Send + Sync>;
type SelectFn = Arc<dyn Fn(&CellValue) + Send + Sync>;

/// A cell type assembled from closures.
///
/// Each omitted behaviour falls back to the [`Text`] default.
#[derive(Clone)]
pub struct CustomCell {
    name: String,
    render: Option<RenderFn>,
    compare: Option<CompareFn>,
    after_render: Option<AfterRenderFn>,
    on_select: Option<SelectFn>,
}

impl CustomCell {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            render: None,
            compare: None,
            after_render: None,
            on_select: None,
        }
    }

    pub fn render(mut self, f: impl Fn(&CellValue) -> Content + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn compare(
        mut self,
        f: impl Fn(&CellValue, &CellValue) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.compare = Some(Arc::new(f));
        self
    }

    pub fn after_render(mut self, f: impl Fn(usize, &mut Element) + Send + Sync + 'static) -> Self {
        self.after_render = Some(Arc::new(f));
        self
    }

    pub fn on_select(mut self, f: impl Fn(&CellValue) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for CustomCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCell")
            .field("name", &self.name)
            .field("render", &self.render.is_some())
            .field("compare", &self.compare.is_some())
            .field("after_render", &self.after_render.is_some())
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl CellType for CustomCell {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, value: &CellValue) -> Content {
        match &self.render {
            Some(f) => f(value),
            None => Text.render(value),
        }
    }

    fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        match &self.compare {
            Some(f) => f(a, b),
            None => Text.compare(a, b),
        }
    }

    fn after_render(&self, column: usize, table: &mut Element) {
        if let Some(f) = &self.after_render {
            f(column, table);
        }
    }

    fn on_select(&self, value: &CellValue) {
        if let Some(f) = &self.on_select {
            f(value);
        }
    }
}

// -----------------------------------------------------------------------------
// Registry
// -----------------------------------------------------------------------------

/// Named cell types, used when column trees come from configuration.
///
/// A fresh registry holds the built-ins under `text`, `number`, `text_url`,
/// `number_url` and `number_html`.
#[derive(Clone)]
pub struct CellTypes {
    types: HashMap<String, Arc<dyn CellType>>,
}

impl Default for CellTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl CellTypes {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("text", Arc::new(Text));
        registry.register("number", Arc::new(Number));
        registry.register("text_url", Arc::new(TextLink));
        registry.register("number_url", Arc::new(NumberLink));
        registry.register("number_html", Arc::new(NumberHtml));
        registry
    }

    /// A registry without the built-ins.
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Register (or replace) a type under `name`.
    pub fn register(&mut self, name: impl Into<String>, cell_type: Arc<dyn CellType>) {
        self.types.insert(name.into(), cell_type);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CellType>> {
        self.types.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for CellTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellTypes").field("names", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    use super::*;

    #[test]
    fn test_text_compare_is_lexicographic() {
        assert_eq!(
            Text.compare(&CellValue::from(10), &CellValue::from(9)),
            Ordering::Less,
            "\"10\" sorts before \"9\" as text"
        );
    }

    #[test]
    fn test_number_compare_is_numeric() {
        assert_eq!(
            Number.compare(&CellValue::from(10), &CellValue::from(9)),
            Ordering::Greater
        );
        assert_eq!(
            Number.compare(&CellValue::Null, &CellValue::from(-5)),
            Ordering::Less
        );
    }

    #[test]
    fn test_text_link_renders_anchor() {
        let content = TextLink.render(&CellValue::link("wiki", "/ds/wiki"));
        let Content::Children(children) = content else {
            panic!("expected anchor element");
        };
        assert_eq!(children[0].tag, "a");
        assert_eq!(children[0].get_attr("href").map(String::as_str), Some("/ds/wiki"));
        assert_eq!(children[0].text_content(), "wiki");
    }

    #[test]
    fn test_text_link_compares_by_text() {
        let a = CellValue::link("alpha", "/z");
        let b = CellValue::link("beta", "/a");
        assert_eq!(TextLink.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_number_link_compares_by_number() {
        let a = CellValue::number_link(20.0, "/a");
        let b = CellValue::number_link(3.0, "/b");
        assert_eq!(NumberLink.compare(&a, &b), Ordering::Greater);
        let Content::Children(children) = NumberLink.render(&a) else {
            panic!("expected anchor element");
        };
        assert_eq!(children[0].text_content(), "20");
    }

    #[test]
    fn test_number_html_is_verbatim() {
        let v = CellValue::number_html(1.0, "<span class=\"ok\">1</span>");
        assert_eq!(
            NumberHtml.render(&v),
            Content::Html("<span class=\"ok\">1</span>".to_string())
        );
    }

    #[test]
    fn test_custom_falls_back_to_text_defaults() {
        let custom = CustomCell::new("plain");
        assert_eq!(CellType::render(&custom, &CellValue::from(5)), Content::Text("5".into()));
        assert_eq!(
            CellType::compare(&custom, &CellValue::from(10), &CellValue::from(9)),
            Ordering::Less
        );
    }

    #[test]
    fn test_custom_hooks_run() {
        let selected = Arc::new(AtomicUsize::new(0));
        let counter = selected.clone();
        let custom = CustomCell::new("button")
            .on_select(move |_| {
                counter.fetch_add(1, AtomicOrdering::SeqCst);
            })
            .after_render(|column, table| table.add_class(format!("armed-{column}")));

        CellType::on_select(&custom, &CellValue::Null);
        let mut table = Element::table();
        CellType::after_render(&custom, 3, &mut table);

        assert_eq!(selected.load(AtomicOrdering::SeqCst), 1);
        assert!(table.has_class("armed-3"));
    }

    #[test]
    fn test_registry_builtins() {
        let types = CellTypes::new();
        assert_eq!(
            types.names(),
            vec!["number", "number_html", "number_url", "text", "text_url"]
        );
        assert_eq!(types.get("number").map(|t| t.name().to_string()), Some("number".into()));
        assert!(types.get("missing").is_none());
        assert!(!CellTypes::empty().contains("text"));
    }
}
