//! Report document model and its builder
//!
//! The builder turns resolved checklist entries plus [`ReportMetadata`] into a
//! [`DocumentModel`]: page chrome, a title, the metadata table, the checklist
//! table, a notes section and a signature block. Encoders in
//! [`crate::renderer`] turn the model into bytes.

mod builder;
pub mod config;
mod metadata;
pub mod model;

pub use builder::{
    build, style_for, DocumentBuilder, CHECKLIST_COLUMNS, CHECKLIST_HEADING, LABEL_DATE,
    LABEL_PRODUCT, LABEL_TESTER, LABEL_VERSION, NOTES_HEADING, NOTES_HINT, RESULT_PLACEHOLDER,
    SIGNATURE_HEADING, SIGNATURE_LINES,
};
pub use config::LayoutConfig;
pub use metadata::{ReportMetadata, DEFAULT_PRODUCT, DEFAULT_VERSION};
pub use model::*;
