//! Template resolution - turns a template name into checklist entries
//!
//! Resolution is total. It walks a fixed fallback chain and the built-in
//! checklist is always the last tier, so a missing or broken catalog never
//! stops a report from being produced.

use std::fmt;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::catalog::{Catalog, ChecklistEntry};
use crate::error::CatalogError;

use super::builtin::builtin_entries;

/// Name of the catalog section used when the requested one is unusable
pub const DEFAULT_TEMPLATE: &str = "default";

/// Where catalog text comes from
pub trait CatalogSource {
    /// Read the whole catalog
    fn load(&self) -> io::Result<String>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

impl CatalogSource for PathBuf {
    fn load(&self) -> io::Result<String> {
        std::fs::read_to_string(self)
    }

    fn describe(&self) -> String {
        self.display().to_string()
    }
}

/// Catalog text already in memory
#[derive(Debug, Clone, Copy)]
pub struct InlineCatalog<'a>(pub &'a str);

impl CatalogSource for InlineCatalog<'_> {
    fn load(&self) -> io::Result<String> {
        Ok(self.0.to_string())
    }

    fn describe(&self) -> String {
        "<inline catalog>".to_string()
    }
}

/// One tier of the fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// The template that was asked for
    Requested(String),
    /// The catalog's `default` section, standing in for the requested one
    CatalogDefault,
    /// The built-in checklist
    BuiltIn,
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateOrigin::Requested(name) => write!(f, "catalog template '{}'", name),
            TemplateOrigin::CatalogDefault => write!(f, "catalog template '{}'", DEFAULT_TEMPLATE),
            TemplateOrigin::BuiltIn => write!(f, "built-in checklist"),
        }
    }
}

/// Result of resolving a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub entries: Vec<ChecklistEntry>,
    pub origin: TemplateOrigin,
}

/// The tiers tried for `template`, in order
pub fn fallback_chain(template: &str) -> Vec<TemplateOrigin> {
    let mut chain = vec![TemplateOrigin::Requested(template.to_string())];
    if template != DEFAULT_TEMPLATE {
        chain.push(TemplateOrigin::CatalogDefault);
    }
    chain.push(TemplateOrigin::BuiltIn);
    chain
}

/// Resolve `template` against a catalog source. Never fails.
pub fn resolve(source: &dyn CatalogSource, template: &str) -> Resolution {
    match source.load() {
        Ok(text) => resolve_text(Some(&text), template),
        Err(e) => {
            warn!(
                catalog = %source.describe(),
                error = %e,
                "template catalog unavailable, using built-in checklist"
            );
            resolve_text(None, template)
        }
    }
}

/// Resolve `template` against catalog text, `None` meaning no catalog
pub fn resolve_text(catalog: Option<&str>, template: &str) -> Resolution {
    let catalog = catalog.map(Catalog::parse);
    if let Some(catalog) = &catalog {
        warn_duplicates(catalog);
    }

    for origin in fallback_chain(template) {
        if let Some(entries) = attempt(&origin, catalog.as_ref()) {
            debug!(%origin, entries = entries.len(), "template resolved");
            return Resolution { entries, origin };
        }
    }

    Resolution {
        entries: builtin_entries(),
        origin: TemplateOrigin::BuiltIn,
    }
}

fn attempt(origin: &TemplateOrigin, catalog: Option<&Catalog<'_>>) -> Option<Vec<ChecklistEntry>> {
    match origin {
        TemplateOrigin::BuiltIn => Some(builtin_entries()),
        TemplateOrigin::Requested(name) => {
            let result = catalog?.template(name);
            if let Err(e) = &result {
                warn!(template = %name, reason = %e, "requested template unusable");
            }
            result.ok()
        }
        TemplateOrigin::CatalogDefault => {
            let result = catalog?.template(DEFAULT_TEMPLATE);
            match &result {
                Ok(_) => warn!("substituting catalog template '{}'", DEFAULT_TEMPLATE),
                Err(e) => warn!(reason = %e, "catalog has no usable '{}' template", DEFAULT_TEMPLATE),
            }
            result.ok()
        }
    }
}

fn warn_duplicates(catalog: &Catalog<'_>) {
    for diagnostic in catalog.diagnostics() {
        if let CatalogError::Duplicate { name, .. } = diagnostic {
            warn!(section = %name, "duplicate catalog section ignored, first one wins");
        }
    }
}
