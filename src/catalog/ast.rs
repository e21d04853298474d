//! Syntax tree for template catalogs

use serde::{Deserialize, Serialize};

pub use crate::error::Span;

/// One row of a verification checklist: the function under test and what to
/// verify about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub function: String,
    pub points: String,
}

impl ChecklistEntry {
    pub fn new(function: impl Into<String>, points: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            points: points.into(),
        }
    }
}

/// A `## name` section of a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// First word of the heading; this is what templates are looked up by
    pub name: String,
    /// Rest of the heading after the name, possibly empty
    pub title: String,
    /// The heading line
    pub heading: Span,
    /// First ```` ```json ```` block of the section
    pub payload: Option<Payload>,
}

impl Section {
    /// Case-insensitive comparison against a requested template name.
    /// Either the first word of the heading or the whole heading matches.
    pub fn is_named(&self, name: &str) -> bool {
        let wanted = fold(name);
        if self.name.is_empty() || wanted.is_empty() {
            return false;
        }
        wanted == fold(&self.name) || wanted == fold(&self.heading_text())
    }

    /// Heading text after the `##` marker
    pub fn heading_text(&self) -> String {
        if self.title.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.title)
        }
    }
}

/// Lowercase with runs of whitespace collapsed to one space
fn fold(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A fenced structured block inside a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// The opening fence line
    pub fence: Span,
    /// Text between the fences
    pub body: Span,
    /// False when input ended before a closing fence
    pub terminated: bool,
}

/// Shape of the JSON inside a payload
#[derive(Debug, Deserialize)]
pub(crate) struct TemplateDocument {
    pub items: Option<Vec<ChecklistEntry>>,
}
