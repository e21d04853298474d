//! Diagnostics for template catalogs

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in catalog text
pub type Span = std::ops::Range<usize>;

/// Problems found while looking up or validating a catalog template.
///
/// None of these abort report generation: the resolver treats every variant
/// as "not found" and moves on to the next tier of its fallback chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("template not found: {name}")]
    NotFound { name: String },

    #[error("section '{name}' has no ```json block")]
    MissingPayload { name: String, span: Span },

    #[error("section '{name}' has an unterminated ```json block")]
    Unterminated { name: String, span: Span },

    #[error("invalid JSON in section '{name}': {message}")]
    Malformed {
        name: String,
        span: Span,
        message: String,
    },

    #[error("JSON block of section '{name}' has no `items` key")]
    MissingItems { name: String, span: Span },

    #[error("duplicate section '{name}'")]
    Duplicate {
        name: String,
        span: Span,
        first: Span,
    },
}

impl CatalogError {
    /// Location of the problem, if it can be pointed at
    pub fn span(&self) -> Option<&Span> {
        match self {
            CatalogError::NotFound { .. } => None,
            CatalogError::MissingPayload { span, .. }
            | CatalogError::Unterminated { span, .. }
            | CatalogError::Malformed { span, .. }
            | CatalogError::MissingItems { span, .. }
            | CatalogError::Duplicate { span, .. } => Some(span),
        }
    }

    /// Whether this diagnostic still lets a lookup succeed
    pub fn is_warning(&self) -> bool {
        matches!(self, CatalogError::Duplicate { .. })
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return format!("error: {}\n", self);
        };

        let kind = if self.is_warning() {
            ReportKind::Warning
        } else {
            ReportKind::Error
        };
        let range = char_range(source, span);
        let mut report = Report::build(kind, filename, range.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, range))
                    .with_message(self.label_message())
                    .with_color(Color::Red),
            );

        if let CatalogError::Duplicate { first, .. } = self {
            report = report.with_label(
                Label::new((filename, char_range(source, first)))
                    .with_message("first defined here")
                    .with_color(Color::Blue),
            );
        }

        let mut buf = Vec::new();
        match report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
        {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("error: {}\n", self),
        }
    }

    fn label_message(&self) -> String {
        match self {
            CatalogError::NotFound { .. } => String::new(),
            CatalogError::MissingPayload { .. } => "expected a ```json block in this section".into(),
            CatalogError::Unterminated { .. } => "this fence is never closed".into(),
            CatalogError::Malformed { message, .. } => message.clone(),
            CatalogError::MissingItems { .. } => "expected {\"items\": [...]}".into(),
            CatalogError::Duplicate { .. } => "ignored, an earlier section has this name".into(),
        }
    }
}

/// ariadne counts characters, spans count bytes
fn char_range(source: &str, span: &Span) -> std::ops::Range<usize> {
    let to_char = |byte: usize| {
        let byte = byte.min(source.len());
        let mut boundary = byte;
        while !source.is_char_boundary(boundary) {
            boundary -= 1;
        }
        source[..boundary].chars().count()
    };
    to_char(span.start)..to_char(span.end)
}
