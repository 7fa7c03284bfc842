#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    /// Plain text, escaped on serialization.
    Text(String),
    /// Caller-trusted markup, written verbatim.
    Html(String),
    Children(Vec<super::Element>),
}

impl Content {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(s) | Self::Html(s) => s.is_empty(),
            Self::Children(c) => c.is_empty(),
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<super::Element> for Content {
    fn from(element: super::Element) -> Self {
        Self::Children(vec![element])
    }
}
