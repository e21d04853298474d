//! DOCX encoding of document models using docx-rs

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BorderType, Docx, FieldCharType, Footer, Header, InstrNUMPAGES, InstrPAGE,
    InstrText, LineSpacing, PageMargin, ParagraphBorder, ParagraphBorderPosition, Pic, Run,
    RunFonts, Shading, ShdType, Style, StyleType, TableCellBorder, TableCellBorderPosition,
    TableCellMargins, VAlignType, WidthType,
};
use thiserror::Error;

use crate::document::{
    Alignment, Block, Border, DocumentModel, Field, Image, Inline, Margins, Paragraph,
    ParagraphStyle, Rule, RuleEdge, RunStyle, Table, TableCell, TableRow, VerticalAlign,
};

/// EMUs per CSS pixel at 96 dpi
const EMU_PER_PIXEL: u32 = 9525;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to pack docx archive: {0}")]
    Pack(String),
}

/// Encode a document model as a .docx file
pub fn encode_docx(model: &DocumentModel) -> Result<Vec<u8>, EncodeError> {
    let mut docx = Docx::new()
        .page_size(model.page.width, model.page.height)
        .page_margin(page_margin(&model.page.margins))
        .header(model.header.iter().fold(Header::new(), |header, p| {
            header.add_paragraph(paragraph(p))
        }))
        .footer(model.footer.iter().fold(Footer::new(), |footer, p| {
            footer.add_paragraph(paragraph(p))
        }));

    if let Some(font) = &model.default_run.font {
        docx = docx.default_fonts(run_fonts(font));
    }
    if let Some(size) = model.default_run.size {
        docx = docx.default_size(size);
    }

    for style in &model.styles {
        docx = docx.add_style(paragraph_style(style));
    }

    for block in &model.body {
        docx = match block {
            Block::Paragraph(p) => docx.add_paragraph(paragraph(p)),
            Block::Table(t) => docx.add_table(table(t)),
        };
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| EncodeError::Pack(e.to_string()))?;
    Ok(buf.into_inner())
}

fn page_margin(margins: &Margins) -> PageMargin {
    PageMargin::new()
        .top(margins.top as i32)
        .right(margins.right as i32)
        .bottom(margins.bottom as i32)
        .left(margins.left as i32)
}

fn run_fonts(font: &str) -> RunFonts {
    RunFonts::new().ascii(font).hi_ansi(font).east_asia(font)
}

fn alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
    }
}

fn paragraph_style(style: &ParagraphStyle) -> Style {
    let mut out = Style::new(style.id.id(), StyleType::Paragraph)
        .name(style.id.name())
        .based_on("Normal")
        .next("Normal")
        .align(alignment(style.alignment));
    if let Some(font) = &style.run.font {
        out = out.fonts(run_fonts(font));
    }
    if let Some(size) = style.run.size {
        out = out.size(size);
    }
    if style.run.bold {
        out = out.bold();
    }
    if let Some(color) = &style.run.color {
        out = out.color(color);
    }
    out
}

fn styled_run(style: &RunStyle) -> Run {
    let mut run = Run::new();
    if let Some(font) = &style.font {
        run = run.fonts(run_fonts(font));
    }
    if let Some(size) = style.size {
        run = run.size(size);
    }
    if style.bold {
        run = run.bold();
    }
    if let Some(color) = &style.color {
        run = run.color(color);
    }
    run
}

fn field_run(field: Field, style: &RunStyle) -> Run {
    let instr = match field {
        Field::PageNumber => InstrText::PAGE(InstrPAGE::new()),
        Field::TotalPages => InstrText::NUMPAGES(InstrNUMPAGES::new()),
    };
    styled_run(style)
        .add_field_char(FieldCharType::Begin, false)
        .add_instr_text(instr)
        .add_field_char(FieldCharType::Separate, false)
        .add_text("1")
        .add_field_char(FieldCharType::End, false)
}

fn image_run(image: &Image) -> Run {
    let pic = Pic::new_with_dimensions(image.data.clone(), image.width_px, image.height_px)
        .size(image.width_px * EMU_PER_PIXEL, image.height_px * EMU_PER_PIXEL);
    Run::new().add_image(pic)
}

fn paragraph_border(rule: &Rule) -> ParagraphBorder {
    let position = match rule.edge {
        RuleEdge::Top => ParagraphBorderPosition::Top,
        RuleEdge::Bottom => ParagraphBorderPosition::Bottom,
    };
    ParagraphBorder::new(position)
        .size(rule.size)
        .color(rule.color.as_str())
}

fn paragraph(p: &Paragraph) -> docx_rs::Paragraph {
    let mut out = docx_rs::Paragraph::new().align(alignment(p.alignment));
    if let Some(style) = p.style {
        out = out.style(style.id());
    }
    if let Some(rule) = &p.rule {
        out.property = out.property.set_border(paragraph_border(rule));
    }
    if let Some(spacing) = p.spacing {
        out = out.line_spacing(LineSpacing::new().before(spacing.before).after(spacing.after));
    }
    for inline in &p.inlines {
        let run = match inline {
            Inline::Text { text, style } => styled_run(style).add_text(text.as_str()),
            Inline::Field { field, style } => field_run(*field, style),
            Inline::Image(image) => image_run(image),
        };
        out = out.add_run(run);
    }
    out
}

fn table(t: &Table) -> docx_rs::Table {
    let rows = t.rows.iter().map(|row| table_row(row, &t.border)).collect();
    let m = &t.cell_margins;
    docx_rs::Table::new(rows)
        .set_grid(t.column_widths.iter().map(|w| *w as usize).collect())
        .width(t.width as usize, WidthType::Dxa)
        .margins(TableCellMargins::new().margin(
            m.top as usize,
            m.right as usize,
            m.bottom as usize,
            m.left as usize,
        ))
}

fn table_row(row: &TableRow, border: &Border) -> docx_rs::TableRow {
    docx_rs::TableRow::new(row.cells.iter().map(|c| table_cell(c, border)).collect())
}

fn table_cell(cell: &TableCell, border: &Border) -> docx_rs::TableCell {
    let mut out = docx_rs::TableCell::new()
        .add_paragraph(paragraph(&cell.paragraph))
        .width(cell.width as usize, WidthType::Dxa)
        .vertical_align(match cell.vertical_align {
            VerticalAlign::Top => VAlignType::Top,
            VerticalAlign::Center => VAlignType::Center,
        });

    if cell.span > 1 {
        out = out.grid_span(cell.span);
    }
    if let Some(fill) = &cell.shading {
        out = out.shading(Shading::new().shd_type(ShdType::Clear).fill(fill.as_str()));
    }
    for position in [
        TableCellBorderPosition::Top,
        TableCellBorderPosition::Bottom,
        TableCellBorderPosition::Left,
        TableCellBorderPosition::Right,
    ] {
        out = out.set_border(
            TableCellBorder::new(position)
                .border_type(BorderType::Single)
                .size(border.size)
                .color(border.color.as_str()),
        );
    }
    out
}
