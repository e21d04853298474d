//! xingxin-test-doc - product verification report generator
//!
//! This library resolves a named checklist template from a markdown catalog,
//! assembles the verification report document around it, and encodes it as
//! a .docx file.
//!
//! # Example
//!
//! ```rust
//! use xingxin_test_doc::{build, resolve_text, ReportMetadata};
//!
//! let catalog = "## default\n```json\n{\"items\": [{\"function\": \"性能测试\", \"points\": \"测试系统响应时间\"}]}\n```\n";
//!
//! let resolution = resolve_text(Some(catalog), "default");
//! let model = build(&resolution.entries, &ReportMetadata::new("张三", "2024-01-01"));
//! assert_eq!(model.checklist_table().unwrap().row_count(), 2);
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod output;
pub mod renderer;
pub mod template;
pub mod theme;

pub use catalog::{find_template_block, Catalog, ChecklistEntry};
pub use document::{build, style_for, DocumentBuilder, DocumentModel, LayoutConfig, ReportMetadata};
pub use error::CatalogError;
pub use output::{file_name, name_for};
pub use renderer::{encode_docx, render_outline, EncodeError};
pub use template::{resolve, resolve_text, Resolution, TemplateOrigin};
pub use theme::{Theme, ThemeError};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

/// First bytes of every PNG file
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Errors that stop a report from being written
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("cannot create output directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Configuration for the complete generation pipeline
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Template catalog file
    pub catalog: PathBuf,
    /// Header logo; a missing file means text-only branding
    pub logo: Option<PathBuf>,
    pub theme: Theme,
    pub layout: LayoutConfig,
    /// Directory the report is written to, created if needed
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("references/templates.md"),
            logo: Some(PathBuf::from("assets/logo.png")),
            theme: Theme::default(),
            layout: LayoutConfig::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ReportConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template catalog file
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = path.into();
        self
    }

    /// Set or clear the logo file
    pub fn with_logo(mut self, path: Option<PathBuf>) -> Self {
        self.logo = path;
        self
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// A resolved and assembled report, not yet encoded
#[derive(Debug, Clone)]
pub struct Report {
    pub resolution: Resolution,
    pub model: DocumentModel,
}

/// What [`generate`] wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    pub file_name: String,
    pub path: PathBuf,
    pub entry_count: usize,
    pub origin: TemplateOrigin,
}

/// Resolve the checklist and build the document model. Never fails: catalog
/// and logo problems are logged and worked around.
pub fn prepare(metadata: &ReportMetadata, config: &ReportConfig) -> Report {
    let resolution = resolve(&config.catalog, &metadata.template);
    let logo = config.logo.as_deref().and_then(load_logo);

    let model = DocumentBuilder::new(&config.theme)
        .with_layout(config.layout.clone())
        .with_logo(logo)
        .build(&resolution.entries, metadata);

    Report { resolution, model }
}

/// Resolve, build, encode and write a report
pub fn generate(metadata: &ReportMetadata, config: &ReportConfig) -> Result<GeneratedReport, ReportError> {
    let Report { resolution, model } = prepare(metadata, config);
    let bytes = encode_docx(&model)?;

    let name = file_name(&config.theme.branding.file_prefix, &metadata.user);
    let path = output::write_report(&config.output_dir, &name, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "report written");

    Ok(GeneratedReport {
        file_name: name,
        path,
        entry_count: resolution.entries.len(),
        origin: resolution.origin,
    })
}

/// Read a logo image. Anything other than a readable PNG yields `None`.
pub fn load_logo(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.starts_with(&PNG_SIGNATURE) => Some(bytes),
        Ok(_) => {
            warn!(logo = %path.display(), "logo is not a PNG image, using text-only header");
            None
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(logo = %path.display(), "no logo, using text-only header");
            None
        }
        Err(e) => {
            warn!(logo = %path.display(), error = %e, "cannot read logo, using text-only header");
            None
        }
    }
}
