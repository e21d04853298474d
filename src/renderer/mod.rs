//! Encoders that turn a [`DocumentModel`](crate::document::DocumentModel)
//! into output
//!
//! `docx` writes the downloadable report; `outline` prints a plain-text view
//! of the same model.

pub mod docx;
pub mod outline;

pub use self::docx::{encode_docx, EncodeError};
pub use outline::render_outline;
