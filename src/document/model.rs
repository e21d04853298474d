//! Encoder-independent document tree
//!
//! Lengths are in the units word processors use: `Dxa` (twentieths of a
//! point) for page and table geometry, half-points for font sizes.

/// Twentieths of a point
pub type Dxa = u32;

/// Font size unit
pub type HalfPoints = usize;

/// A complete report document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentModel {
    pub page: PageSetup,
    /// Base run properties for body text
    pub default_run: RunStyle,
    /// Named paragraph styles referenced by body paragraphs
    pub styles: Vec<ParagraphStyle>,
    /// Repeated at the top of every page
    pub header: Vec<Paragraph>,
    /// Repeated at the bottom of every page
    pub footer: Vec<Paragraph>,
    pub body: Vec<Block>,
}

impl DocumentModel {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Paragraph(_) => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) => Some(paragraph),
            Block::Table(_) => None,
        })
    }

    pub fn table(&self, kind: TableKind) -> Option<&Table> {
        self.tables().find(|table| table.kind == kind)
    }

    pub fn metadata_table(&self) -> Option<&Table> {
        self.table(TableKind::Metadata)
    }

    pub fn checklist_table(&self) -> Option<&Table> {
        self.table(TableKind::Checklist)
    }

    /// Text of body paragraphs using `style`, in order
    pub fn headings(&self, style: StyleId) -> Vec<String> {
        self.paragraphs()
            .filter(|p| p.style == Some(style))
            .map(Paragraph::plain_text)
            .collect()
    }

    /// Whether the page header carries an image
    pub fn has_logo(&self) -> bool {
        self.header
            .iter()
            .flat_map(|p| p.inlines.iter())
            .any(|inline| matches!(inline, Inline::Image(_)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub width: Dxa,
    pub height: Dxa,
    pub margins: Margins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: Dxa,
    pub right: Dxa,
    pub bottom: Dxa,
    pub left: Dxa,
}

impl Margins {
    pub fn new(top: Dxa, right: Dxa, bottom: Dxa, left: Dxa) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Paragraph styles the document defines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleId {
    Heading1,
    Heading2,
}

impl StyleId {
    pub fn id(self) -> &'static str {
        match self {
            StyleId::Heading1 => "Heading1",
            StyleId::Heading2 => "Heading2",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StyleId::Heading1 => "Heading 1",
            StyleId::Heading2 => "Heading 2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphStyle {
    pub id: StyleId,
    pub run: RunStyle,
    pub alignment: Alignment,
    pub spacing: Spacing,
}

/// Character formatting; `None` inherits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub font: Option<String>,
    pub size: Option<HalfPoints>,
    pub bold: bool,
    pub color: Option<String>,
}

impl RunStyle {
    pub fn new(font: impl Into<String>, size: HalfPoints) -> Self {
        Self {
            font: Some(font.into()),
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spacing {
    pub before: Dxa,
    pub after: Dxa,
}

impl Spacing {
    pub fn new(before: Dxa, after: Dxa) -> Self {
        Self { before, after }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEdge {
    Top,
    Bottom,
}

/// A horizontal line drawn along one edge of a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub edge: RuleEdge,
    /// Eighths of a point
    pub size: usize,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style: Option<StyleId>,
    pub alignment: Alignment,
    pub spacing: Option<Spacing>,
    pub rule: Option<Rule>,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph holding a single run of text
    pub fn text(text: impl Into<String>, style: RunStyle) -> Self {
        Self::new().push(Inline::Text {
            text: text.into(),
            style,
        })
    }

    /// An empty paragraph used as vertical space
    pub fn spacer(before: Dxa, after: Dxa) -> Self {
        Self::new().spacing(before, after)
    }

    pub fn push(mut self, inline: Inline) -> Self {
        self.inlines.push(inline);
        self
    }

    pub fn style(mut self, style: StyleId) -> Self {
        self.style = Some(style);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, before: Dxa, after: Dxa) -> Self {
        self.spacing = Some(Spacing::new(before, after));
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Concatenated text; fields render as `{PAGE}` / `{NUMPAGES}`
    pub fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text { text, .. } => text.clone(),
                Inline::Field { field, .. } => field.placeholder().to_string(),
                Inline::Image(_) => String::new(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text { text: String, style: RunStyle },
    Field { field: Field, style: RunStyle },
    Image(Image),
}

/// Values the word processor fills in when laying out pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    PageNumber,
    TotalPages,
}

impl Field {
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::PageNumber => "{PAGE}",
            Field::TotalPages => "{NUMPAGES}",
        }
    }
}

/// Raster image shown at a fixed size
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    pub data: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("bytes", &self.data.len())
            .field("width_px", &self.width_px)
            .field("height_px", &self.height_px)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Metadata,
    Checklist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub kind: TableKind,
    pub width: Dxa,
    pub column_widths: Vec<Dxa>,
    /// Padding inside every cell
    pub cell_margins: Margins,
    pub border: Border,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell texts row by row
    pub fn texts(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(TableCell::text).collect())
            .collect()
    }
}

/// Single-line border drawn on every side of every cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    /// Eighths of a point
    pub size: usize,
    pub color: String,
}

/// Zebra striping of checklist rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Even,
    Odd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    Header,
    Entry(RowStyle),
    /// A label/value row of the metadata table
    Field,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub role: RowRole,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub width: Dxa,
    /// Number of grid columns covered
    pub span: usize,
    /// Background fill, hex without `#`
    pub shading: Option<String>,
    pub vertical_align: VerticalAlign,
    pub paragraph: Paragraph,
}

impl TableCell {
    pub fn text(&self) -> String {
        self.paragraph.plain_text()
    }
}
