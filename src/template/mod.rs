//! Checklist template resolution
//!
//! Given a template name and a catalog, produce the ordered checklist entries
//! for a report. The lookup falls back in a fixed order:
//!
//! 1. the requested catalog section
//! 2. the catalog's `default` section (skipped when `default` was requested)
//! 3. the built-in checklist

mod builtin;
mod resolver;

pub use builtin::{builtin_entries, BUILTIN_ITEMS};
pub use resolver::{
    fallback_chain, resolve, resolve_text, CatalogSource, InlineCatalog, Resolution,
    TemplateOrigin, DEFAULT_TEMPLATE,
};
