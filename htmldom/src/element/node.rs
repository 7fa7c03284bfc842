use std::collections::BTreeMap;

use super::Content;

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub tag: String,
    pub id: Option<String>,

    // Content
    pub content: Content,

    // Visual
    pub classes: Vec<String>,
    pub style: Option<String>,

    // Plain attributes (colspan, href, ...). Ordered so output is stable.
    pub attrs: BTreeMap<String, String>,

    // Interaction
    pub clickable: bool,

    // Custom data storage, serialized as `data-*` attributes (handler wiring, row keys, etc.)
    pub data: BTreeMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            id: None,
            content: Content::None,
            classes: Vec::new(),
            style: None,
            attrs: BTreeMap::new(),
            clickable: false,
            data: BTreeMap::new(),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn table() -> Self {
        Self::new("table")
    }

    pub fn caption(text: impl Into<String>) -> Self {
        Self::new("caption").text(text)
    }

    pub fn thead() -> Self {
        Self::new("thead")
    }

    pub fn tbody() -> Self {
        Self::new("tbody")
    }

    pub fn tr() -> Self {
        Self::new("tr")
    }

    pub fn th() -> Self {
        Self::new("th")
    }

    pub fn td() -> Self {
        Self::new("td")
    }

    /// Hyperlink around `text` pointing at `href`.
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new("a").attr("href", href).text(text)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn html(mut self, markup: impl Into<String>) -> Self {
        self.content = Content::Html(markup.into());
        self
    }

    pub fn content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    // Visual
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add `class` only when `on` holds.
    pub fn class_if(self, class: impl Into<String>, on: bool) -> Self {
        if on { self.class(class) } else { self }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        let style = style.into();
        self.style = if style.is_empty() { None } else { Some(style) };
        self
    }

    // Attributes
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Set `colspan`, omitted when it is the HTML default of 1.
    pub fn colspan(self, span: usize) -> Self {
        if span > 1 {
            self.attr("colspan", span.to_string())
        } else {
            self
        }
    }

    /// Set `rowspan`, omitted when it is the HTML default of 1.
    pub fn rowspan(self, span: usize) -> Self {
        if span > 1 {
            self.attr("rowspan", span.to_string())
        } else {
            self
        }
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::None => self.content = Content::Children(vec![child]),
            _ => {
                // Replace content with children
                self.content = Content::Children(vec![child]);
            }
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            Content::None => self.content = Content::Children(new_children.into_iter().collect()),
            _ => {
                self.content = Content::Children(new_children.into_iter().collect());
            }
        }
        self
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn child_elements_mut(&mut self) -> &mut [Element] {
        match &mut self.content {
            Content::Children(children) => children,
            _ => &mut [],
        }
    }

    /// Concatenated text of this element and its descendants. Raw HTML is
    /// included as-is.
    pub fn text_content(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(s) | Content::Html(s) => s.clone(),
            Content::Children(children) => children.iter().map(Element::text_content).collect(),
        }
    }

    /// Depth-first iterator over this element and all descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Visit this element and every descendant mutably, parents first.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        if let Content::Children(children) = &mut self.content {
            for child in children {
                child.walk_mut(f);
            }
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Reverse so children come out in document order
        self.stack.extend(next.child_elements().iter().rev());
        Some(next)
    }
}
