//! Report metadata supplied by the caller

use crate::template::DEFAULT_TEMPLATE;

pub const DEFAULT_VERSION: &str = "v1.0.0";
pub const DEFAULT_PRODUCT: &str = "行芯产品";

/// Who tested what, and when. Values are printed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadata {
    /// Tester name
    pub user: String,
    pub version: String,
    pub product: String,
    /// ISO calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Requested checklist template
    pub template: String,
}

impl ReportMetadata {
    /// Metadata for `user` with the default product, version and template
    pub fn new(user: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            version: DEFAULT_VERSION.to_string(),
            product: DEFAULT_PRODUCT.to_string(),
            date: date.into(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }
}
