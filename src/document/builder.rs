//! Assembles the report document from resolved entries and metadata

use crate::catalog::ChecklistEntry;
use crate::theme::Theme;

use super::config::LayoutConfig;
use super::metadata::ReportMetadata;
use super::model::{
    Alignment, Block, Border, DocumentModel, Dxa, Field, Image, Inline, Margins, Paragraph,
    ParagraphStyle, RowRole, RowStyle, Rule, RuleEdge, RunStyle, Spacing, StyleId, Table,
    TableCell, TableKind, TableRow, VerticalAlign,
};

pub const CHECKLIST_HEADING: &str = "测试项目清单";
pub const CHECKLIST_COLUMNS: [&str; 3] = ["测试功能点", "测试要点", "测试结果"];
/// Printed in the result column of every entry row; ticked by hand
pub const RESULT_PLACEHOLDER: &str = "□ 通过    □ 失败    □ 待测试";

pub const LABEL_PRODUCT: &str = "产品名称：";
pub const LABEL_VERSION: &str = "版本号：";
pub const LABEL_DATE: &str = "测试日期：";
pub const LABEL_TESTER: &str = "测试人员：";

pub const NOTES_HEADING: &str = "备注";
pub const NOTES_HINT: &str = "（此处可填写测试过程中的特殊情况说明、环境配置信息、问题记录等）";
pub const SIGNATURE_HEADING: &str = "签字确认";
pub const SIGNATURE_LINES: [&str; 2] = [
    "测试人员签字：____________________    日期：____________________",
    "审核人员签字：____________________    日期：____________________",
];

// Font sizes in half-points
const TITLE_SIZE: usize = 36;
const SUBHEADING_SIZE: usize = 26;
const BODY_SIZE: usize = 24;
const TABLE_HEADER_SIZE: usize = 22;
const CELL_SIZE: usize = 21;
const RESULT_SIZE: usize = 20;
const BRANDING_SIZE: usize = 20;
const FOOTER_SIZE: usize = 18;
const SIGNATURE_SIZE: usize = 22;

/// Zebra style of the entry at zero-based `index`: even indices are plain
pub fn style_for(index: usize) -> RowStyle {
    if index % 2 == 0 {
        RowStyle::Even
    } else {
        RowStyle::Odd
    }
}

/// Builds [`DocumentModel`]s. Output depends only on the builder settings and
/// the arguments of [`DocumentBuilder::build`].
#[derive(Debug, Clone)]
pub struct DocumentBuilder<'a> {
    theme: &'a Theme,
    layout: LayoutConfig,
    logo: Option<Vec<u8>>,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            layout: LayoutConfig::default(),
            logo: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Image shown at the start of the page header
    pub fn with_logo(mut self, logo: Option<Vec<u8>>) -> Self {
        self.logo = logo;
        self
    }

    pub fn build(&self, entries: &[ChecklistEntry], metadata: &ReportMetadata) -> DocumentModel {
        let mut body = vec![
            Block::Paragraph(
                Paragraph::text(self.theme.branding.title.clone(), RunStyle::default())
                    .style(StyleId::Heading1),
            ),
            Block::Table(self.metadata_table(metadata)),
            Block::Paragraph(Paragraph::spacer(200, 200)),
            Block::Paragraph(self.subheading(CHECKLIST_HEADING)),
            Block::Table(self.checklist_table(entries)),
            Block::Paragraph(Paragraph::spacer(300, 200)),
        ];
        body.extend(self.notes_section().into_iter().map(Block::Paragraph));
        body.push(Block::Paragraph(Paragraph::spacer(400, 100)));
        body.extend(self.signature_section().into_iter().map(Block::Paragraph));

        DocumentModel {
            page: self.layout.page,
            default_run: RunStyle::new(self.theme.fonts.body.clone(), BODY_SIZE),
            styles: self.paragraph_styles(),
            header: self.header(),
            footer: self.footer(),
            body,
        }
    }

    fn heading_font(&self, size: usize) -> RunStyle {
        RunStyle::new(self.theme.fonts.heading.clone(), size)
    }

    fn body_font(&self, size: usize) -> RunStyle {
        RunStyle::new(self.theme.fonts.body.clone(), size)
    }

    fn paragraph_styles(&self) -> Vec<ParagraphStyle> {
        vec![
            ParagraphStyle {
                id: StyleId::Heading1,
                run: self
                    .heading_font(TITLE_SIZE)
                    .bold()
                    .color(self.theme.color("primary")),
                alignment: Alignment::Center,
                spacing: Spacing::new(400, 300),
            },
            ParagraphStyle {
                id: StyleId::Heading2,
                run: self.heading_font(SUBHEADING_SIZE).bold(),
                alignment: Alignment::Left,
                spacing: Spacing::new(300, 200),
            },
        ]
    }

    fn subheading(&self, text: &str) -> Paragraph {
        Paragraph::text(text, RunStyle::default()).style(StyleId::Heading2)
    }

    fn header(&self) -> Vec<Paragraph> {
        let primary = self.theme.color("primary");
        let mut branding = Paragraph::new().align(Alignment::Center).spacing(0, 100);
        let mut text = self.theme.branding.header.clone();

        if let Some(data) = &self.logo {
            let (width_px, height_px) = self.layout.logo_size;
            branding = branding.push(Inline::Image(Image {
                data: data.clone(),
                width_px,
                height_px,
            }));
            text = format!("   {}", text);
        }

        vec![
            branding.push(Inline::Text {
                text,
                style: self
                    .heading_font(BRANDING_SIZE)
                    .bold()
                    .color(primary.clone()),
            }),
            Paragraph::new().rule(Rule {
                edge: RuleEdge::Bottom,
                size: 6,
                color: primary,
            }),
        ]
    }

    fn footer(&self) -> Vec<Paragraph> {
        let style = self.body_font(FOOTER_SIZE);
        let text = |text: String| Inline::Text {
            text,
            style: style.clone(),
        };
        let field = |field: Field| Inline::Field {
            field,
            style: style.clone(),
        };

        vec![Paragraph::new()
            .align(Alignment::Center)
            .rule(Rule {
                edge: RuleEdge::Top,
                size: 4,
                color: self.theme.color("rule"),
            })
            .push(text(format!("{}  •  第 ", self.theme.branding.confidential)))
            .push(field(Field::PageNumber))
            .push(text(" 页  •  共 ".to_string()))
            .push(field(Field::TotalPages))
            .push(text(" 页".to_string()))]
    }

    fn metadata_table(&self, metadata: &ReportMetadata) -> Table {
        let [label_width, value_width, side_width] = self.layout.metadata_columns;
        let label = |text: &str, width: Dxa| self.label_cell(text, width);
        let value = |text: &str, width: Dxa, span: usize| self.value_cell(text, width, span);

        let rows = vec![
            TableRow {
                role: RowRole::Field,
                cells: vec![
                    label(LABEL_PRODUCT, label_width),
                    value(&metadata.product, value_width, 1),
                    label(LABEL_VERSION, side_width),
                ],
            },
            TableRow {
                role: RowRole::Field,
                cells: vec![
                    label(LABEL_DATE, label_width),
                    value(&metadata.date, value_width, 1),
                    value(&metadata.version, side_width, 1),
                ],
            },
            TableRow {
                role: RowRole::Field,
                cells: vec![
                    label(LABEL_TESTER, label_width),
                    value(&metadata.user, value_width + side_width, 2),
                ],
            },
        ];

        Table {
            kind: TableKind::Metadata,
            width: self.layout.table_width,
            column_widths: self.layout.metadata_columns.to_vec(),
            cell_margins: Margins::new(80, 120, 80, 120),
            border: self.border(),
            rows,
        }
    }

    fn label_cell(&self, text: &str, width: Dxa) -> TableCell {
        TableCell {
            width,
            span: 1,
            shading: Some(self.theme.color("label-fill")),
            vertical_align: VerticalAlign::Top,
            paragraph: Paragraph::text(text, self.heading_font(CELL_SIZE).bold()),
        }
    }

    fn value_cell(&self, text: &str, width: Dxa, span: usize) -> TableCell {
        TableCell {
            width,
            span,
            shading: None,
            vertical_align: VerticalAlign::Top,
            paragraph: Paragraph::text(text, self.body_font(CELL_SIZE)),
        }
    }

    fn checklist_table(&self, entries: &[ChecklistEntry]) -> Table {
        let widths = self.layout.checklist_columns();

        let header = TableRow {
            role: RowRole::Header,
            cells: CHECKLIST_COLUMNS
                .iter()
                .zip(widths)
                .map(|(title, width)| TableCell {
                    width,
                    span: 1,
                    shading: Some(self.theme.color("primary")),
                    vertical_align: VerticalAlign::Center,
                    paragraph: Paragraph::text(
                        *title,
                        self.heading_font(TABLE_HEADER_SIZE)
                            .bold()
                            .color(self.theme.color("on-primary")),
                    )
                    .align(Alignment::Center),
                })
                .collect(),
        };

        let mut rows = Vec::with_capacity(entries.len() + 1);
        rows.push(header);
        rows.extend(
            entries
                .iter()
                .enumerate()
                .map(|(index, entry)| self.entry_row(entry, style_for(index), widths)),
        );

        Table {
            kind: TableKind::Checklist,
            width: self.layout.table_width,
            column_widths: widths.to_vec(),
            cell_margins: Margins::new(80, 120, 80, 120),
            border: self.border(),
            rows,
        }
    }

    fn entry_row(&self, entry: &ChecklistEntry, style: RowStyle, widths: [Dxa; 3]) -> TableRow {
        let shading = match style {
            RowStyle::Even => None,
            RowStyle::Odd => Some(self.theme.color("zebra")),
        };
        let cell = |paragraph: Paragraph, width: Dxa| TableCell {
            width,
            span: 1,
            shading: shading.clone(),
            vertical_align: VerticalAlign::Center,
            paragraph,
        };

        TableRow {
            role: RowRole::Entry(style),
            cells: vec![
                cell(
                    Paragraph::text(entry.function.clone(), self.body_font(CELL_SIZE)),
                    widths[0],
                ),
                cell(
                    Paragraph::text(entry.points.clone(), self.body_font(CELL_SIZE)),
                    widths[1],
                ),
                cell(
                    Paragraph::text(RESULT_PLACEHOLDER, self.body_font(RESULT_SIZE))
                        .align(Alignment::Center),
                    widths[2],
                ),
            ],
        }
    }

    fn border(&self) -> Border {
        Border {
            size: 4,
            color: self.theme.color("border"),
        }
    }

    fn notes_section(&self) -> Vec<Paragraph> {
        vec![
            self.subheading(NOTES_HEADING),
            Paragraph::text(
                NOTES_HINT,
                self.body_font(CELL_SIZE).color(self.theme.color("muted")),
            )
            .spacing(100, 100),
        ]
    }

    fn signature_section(&self) -> Vec<Paragraph> {
        let mut paragraphs = vec![self.subheading(SIGNATURE_HEADING)];
        for line in SIGNATURE_LINES {
            paragraphs.push(Paragraph::spacer(200, 100));
            paragraphs.push(Paragraph::text(line, self.body_font(SIGNATURE_SIZE)).spacing(100, 100));
        }
        paragraphs
    }
}

/// Build a report with the default theme and layout and no logo
pub fn build(entries: &[ChecklistEntry], metadata: &ReportMetadata) -> DocumentModel {
    DocumentBuilder::new(&Theme::default()).build(entries, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metadata() -> ReportMetadata {
        ReportMetadata::new("张三", "2024-01-01")
            .with_product("示例")
            .with_version("v1.0.0")
    }

    fn entries(n: usize) -> Vec<ChecklistEntry> {
        (0..n)
            .map(|i| ChecklistEntry::new(format!("功能{}", i), format!("要点{}", i)))
            .collect()
    }

    #[test]
    fn test_style_for_parity() {
        assert_eq!(style_for(0), RowStyle::Even);
        assert_eq!(style_for(1), RowStyle::Odd);
        assert_eq!(style_for(2), RowStyle::Even);
        assert_eq!(style_for(7), RowStyle::Odd);
    }

    #[test]
    fn test_metadata_table_layout() {
        let model = build(&entries(1), &metadata());
        let table = model.metadata_table().expect("metadata table");
        assert_eq!(
            table.texts(),
            vec![
                vec!["产品名称：", "示例", "版本号："],
                vec!["测试日期：", "2024-01-01", "v1.0.0"],
                vec!["测试人员：", "张三"],
            ]
        );
        assert_eq!(table.rows[2].cells[1].span, 2);
        assert_eq!(table.rows[2].cells[1].width, 4680 + 2340);
        assert_eq!(table.rows[0].cells[0].shading.as_deref(), Some("E8EEF7"));
        assert_eq!(table.rows[0].cells[1].shading, None);
    }

    #[test]
    fn test_checklist_header() {
        let model = build(&entries(2), &metadata());
        let table = model.checklist_table().unwrap();
        let header = &table.rows[0];
        assert_eq!(header.role, RowRole::Header);
        assert_eq!(table.texts()[0], vec!["测试功能点", "测试要点", "测试结果"]);
        assert!(header
            .cells
            .iter()
            .all(|c| c.shading.as_deref() == Some("2E5090")));
        assert_eq!(table.column_widths, vec![2808, 4586, 1966]);
    }

    #[test]
    fn test_entry_rows_carry_placeholder_and_zebra() {
        let model = build(&entries(3), &metadata());
        let table = model.checklist_table().unwrap();
        assert_eq!(table.texts()[1], vec!["功能0", "要点0", RESULT_PLACEHOLDER]);
        assert_eq!(table.rows[1].cells[0].shading, None);
        assert_eq!(table.rows[2].cells[2].shading.as_deref(), Some("F5F5F5"));
        assert_eq!(table.rows[3].role, RowRole::Entry(RowStyle::Even));
    }

    #[test]
    fn test_empty_entries_give_header_only() {
        let model = build(&[], &metadata());
        assert_eq!(model.checklist_table().unwrap().row_count(), 1);
    }

    #[test]
    fn test_section_headings() {
        let model = build(&entries(1), &metadata());
        assert_eq!(model.headings(StyleId::Heading1), vec!["行芯产品验证文档"]);
        assert_eq!(
            model.headings(StyleId::Heading2),
            vec![CHECKLIST_HEADING, NOTES_HEADING, SIGNATURE_HEADING]
        );
    }

    #[test]
    fn test_footer_has_page_fields() {
        let model = build(&[], &metadata());
        assert_eq!(
            model.footer[0].plain_text(),
            "机密文件  •  第 {PAGE} 页  •  共 {NUMPAGES} 页"
        );
    }

    #[test]
    fn test_header_without_logo() {
        let model = build(&[], &metadata());
        assert!(!model.has_logo());
        assert_eq!(model.header[0].plain_text(), "行芯科技 | 产品验证文档");
    }

    #[test]
    fn test_header_with_logo() {
        let theme = Theme::default();
        let model = DocumentBuilder::new(&theme)
            .with_logo(Some(vec![1, 2, 3]))
            .build(&[], &metadata());
        assert!(model.has_logo());
        let Inline::Image(image) = &model.header[0].inlines[0] else {
            panic!("logo should lead the header");
        };
        assert_eq!((image.width_px, image.height_px), (80, 80));
    }

    #[test]
    fn test_theme_branding_flows_through() {
        let theme = Theme::from_str("[branding]\ntitle = \"Acme\"\n[colors]\nzebra = \"#000000\"\n")
            .unwrap();
        let model = DocumentBuilder::new(&theme).build(&entries(2), &metadata());
        assert_eq!(model.headings(StyleId::Heading1), vec!["Acme"]);
        let table = model.checklist_table().unwrap();
        assert_eq!(table.rows[2].cells[0].shading.as_deref(), Some("000000"));
    }
}
