//! Template catalogs: markdown-like text holding named checklist templates
//!
//! A catalog is free-form text in which each template is a `## name` heading
//! followed by a fenced JSON block:
//!
//! ````text
//! ## default
//! ```json
//! { "items": [ { "function": "性能测试", "points": "测试系统响应时间" } ] }
//! ```
//! ````

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::{ChecklistEntry, Payload, Section};
pub use grammar::parse_sections;

use crate::error::{CatalogError, Span};
use ast::TemplateDocument;

/// A parsed catalog, borrowing the text it was parsed from
#[derive(Debug, Clone)]
pub struct Catalog<'src> {
    source: &'src str,
    sections: Vec<Section>,
}

impl<'src> Catalog<'src> {
    /// Parse catalog text. Parsing itself never fails; problems surface when a
    /// template is looked up or through [`Catalog::diagnostics`].
    pub fn parse(source: &'src str) -> Self {
        Self {
            source,
            sections: parse_sections(source),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// First section whose name matches, ignoring case
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.is_named(name))
    }

    /// Entries of the named template, in catalog order
    pub fn template(&self, name: &str) -> Result<Vec<ChecklistEntry>, CatalogError> {
        let section = self.section(name).ok_or_else(|| CatalogError::NotFound {
            name: name.to_string(),
        })?;
        self.entries(section)
    }

    /// Decode the payload of one section
    pub fn entries(&self, section: &Section) -> Result<Vec<ChecklistEntry>, CatalogError> {
        let name = section.name.clone();
        let payload = section
            .payload
            .as_ref()
            .ok_or_else(|| CatalogError::MissingPayload {
                name: name.clone(),
                span: section.heading.clone(),
            })?;

        if !payload.terminated {
            return Err(CatalogError::Unterminated {
                name,
                span: payload.fence.clone(),
            });
        }

        let body = &self.source[payload.body.clone()];
        let document: TemplateDocument =
            serde_json::from_str(body).map_err(|e| CatalogError::Malformed {
                name: name.clone(),
                span: error_line_span(body, payload.body.start, e.line()),
                message: e.to_string(),
            })?;

        document.items.ok_or(CatalogError::MissingItems {
            name,
            span: payload.fence.clone(),
        })
    }

    /// Everything wrong with this catalog: later sections that reuse an
    /// earlier name, and payloads that do not decode
    pub fn diagnostics(&self) -> Vec<CatalogError> {
        let mut found = Vec::new();

        for (index, section) in self.sections.iter().enumerate() {
            let earlier = self.sections[..index]
                .iter()
                .find(|s| s.is_named(&section.name));
            if let Some(first) = earlier {
                found.push(CatalogError::Duplicate {
                    name: section.name.clone(),
                    span: section.heading.clone(),
                    first: first.heading.clone(),
                });
                continue;
            }

            if section.payload.is_some() {
                if let Err(e) = self.entries(section) {
                    found.push(e);
                }
            }
        }

        found
    }
}

/// Find the entries of `template_name` in catalog text.
///
/// Returns `None` when the heading is absent, the section has no JSON block,
/// or the block does not decode to `{"items": [...]}`.
pub fn find_template_block(catalog: &str, template_name: &str) -> Option<Vec<ChecklistEntry>> {
    if template_name.trim().is_empty() {
        return None;
    }
    Catalog::parse(catalog).template(template_name).ok()
}

/// Span of the 1-based `line` within a payload body starting at `offset`
fn error_line_span(body: &str, offset: usize, line: usize) -> Span {
    let mut start = 0;
    for (index, text) in body.split_inclusive('\n').enumerate() {
        if index + 1 == line.max(1) {
            let end = start + text.trim_end_matches(['\r', '\n']).len();
            return (offset + start)..(offset + end);
        }
        start += text.len();
    }
    (offset + body.len())..(offset + body.len())
}
