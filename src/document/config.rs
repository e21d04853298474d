//! Page and table geometry for report documents

use super::model::{Dxa, Margins, PageSetup};

/// Share of the checklist table width given to each column, in percent
pub const CHECKLIST_COLUMN_RATIOS: [u32; 3] = [30, 49, 21];

/// Configuration options for document layout
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Page size and margins (A4 by default)
    pub page: PageSetup,

    /// Width of both tables
    pub table_width: Dxa,

    /// Column widths of the metadata table
    pub metadata_columns: [Dxa; 3],

    /// Displayed logo size in pixels (width, height)
    pub logo_size: (u32, u32),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageSetup {
                width: 11906,
                height: 16838,
                margins: Margins::new(1800, 1440, 1440, 1440),
            },
            table_width: 9360,
            metadata_columns: [2340, 4680, 2340],
            logo_size: (80, 80),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table width; metadata columns keep their 1:2:1 proportions
    pub fn with_table_width(mut self, width: Dxa) -> Self {
        let quarter = width / 4;
        self.table_width = width;
        self.metadata_columns = [quarter, width - 2 * quarter, quarter];
        self
    }

    /// Checklist column widths; the last column absorbs rounding so the
    /// widths always sum to the table width
    pub fn checklist_columns(&self) -> [Dxa; 3] {
        let first = self.table_width * CHECKLIST_COLUMN_RATIOS[0] / 100;
        let second = self.table_width * CHECKLIST_COLUMN_RATIOS[1] / 100;
        [first, second, self.table_width - first - second]
    }
}
