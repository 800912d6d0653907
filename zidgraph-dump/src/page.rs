use std::fmt;

/// One `<page>` element of a MediaWiki export, reduced to the fields the
/// extractor needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPage {
    pub title: String,
    pub id: Option<String>,
    /// Text of the first revision. `None` when the element is missing or empty.
    pub text: Option<String>,
}

impl RawPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: None,
            text: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl fmt::Display for RawPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} (page {})", self.title, id),
            None => write!(f, "{}", self.title),
        }
    }
}
