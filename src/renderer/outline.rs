//! Plain-text outline of a document model, for previews in the terminal

use crate::document::{Block, DocumentModel, RowRole, RowStyle, StyleId, Table};

/// Render the outline. Spacer paragraphs are skipped.
pub fn render_outline(model: &DocumentModel) -> String {
    let mut out = String::new();

    for paragraph in &model.header {
        push_line(&mut out, "header", &paragraph.plain_text());
    }
    if model.has_logo() {
        out.push_str("[header] (logo)\n");
    }

    for block in &model.body {
        match block {
            Block::Paragraph(p) => {
                let text = p.plain_text();
                match p.style {
                    Some(StyleId::Heading1) => out.push_str(&format!("\n# {}\n", text)),
                    Some(StyleId::Heading2) => out.push_str(&format!("\n## {}\n", text)),
                    None if !text.is_empty() => {
                        out.push_str(&text);
                        out.push('\n');
                    }
                    None => {}
                }
            }
            Block::Table(table) => render_table(&mut out, table),
        }
    }

    out.push('\n');
    for paragraph in &model.footer {
        push_line(&mut out, "footer", &paragraph.plain_text());
    }
    out
}

fn push_line(out: &mut String, tag: &str, text: &str) {
    if !text.trim().is_empty() {
        out.push_str(&format!("[{}] {}\n", tag, text.trim()));
    }
}

fn render_table(out: &mut String, table: &Table) {
    for row in &table.rows {
        let tag = match row.role {
            RowRole::Header => "head",
            RowRole::Entry(RowStyle::Even) => "even",
            RowRole::Entry(RowStyle::Odd) => "odd ",
            RowRole::Field => "    ",
        };
        let cells: Vec<String> = row.cells.iter().map(|c| c.text()).collect();
        out.push_str(&format!("{} | {} |\n", tag, cells.join(" | ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ChecklistEntry;
    use crate::document::{build, ReportMetadata, RESULT_PLACEHOLDER};

    #[test]
    fn test_outline_lists_rows_with_styles() {
        let entries = vec![ChecklistEntry::new("A", "B"), ChecklistEntry::new("C", "D")];
        let model = build(&entries, &ReportMetadata::new("张三", "2024-01-01"));
        let outline = render_outline(&model);

        assert!(outline.contains("# 行芯产品验证文档\n"));
        assert!(outline.contains("head | 测试功能点 | 测试要点 | 测试结果 |\n"));
        assert!(outline.contains(&format!("even | A | B | {} |\n", RESULT_PLACEHOLDER)));
        assert!(outline.contains(&format!("odd  | C | D | {} |\n", RESULT_PLACEHOLDER)));
        assert!(outline.contains("     | 测试人员： | 张三 |\n"));
        assert!(outline.contains("[header] 行芯科技 | 产品验证文档\n"));
        assert!(outline.contains("[footer] 机密文件  •  第 {PAGE} 页  •  共 {NUMPAGES} 页\n"));
        assert!(!outline.contains("(logo)"));
    }
}
