//! Integration tests for catalog parsing and template resolution

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use xingxin_test_doc::catalog::ChecklistEntry;
use xingxin_test_doc::error::CatalogError;
use xingxin_test_doc::template::{builtin_entries, InlineCatalog, BUILTIN_ITEMS};
use xingxin_test_doc::{find_template_block, resolve, resolve_text, Catalog, TemplateOrigin};

const CATALOG: &str = include_str!("fixtures/catalog.md");

fn functions(entries: &[ChecklistEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.function.as_str()).collect()
}

#[test]
fn test_default_template_entries_in_order() {
    let catalog = "## default\n```json\n{\"items\": [{\"function\": \"A\", \"points\": \"B\"}, {\"function\": \"C\", \"points\": \"D\"}]}\n```\n";
    let resolution = resolve_text(Some(catalog), "default");
    assert_eq!(
        resolution.entries,
        vec![ChecklistEntry::new("A", "B"), ChecklistEntry::new("C", "D")]
    );
}

#[test]
fn test_no_matching_section_and_no_default_uses_builtin() {
    let catalog = "## other\n```json\n{\"items\": [{\"function\": \"X\", \"points\": \"Y\"}]}\n```\n";
    let resolution = resolve_text(Some(catalog), "custom");
    assert_eq!(resolution.origin, TemplateOrigin::BuiltIn);
    assert_eq!(resolution.entries, builtin_entries());
}

#[test]
fn test_requested_template_found() {
    let resolution = resolve_text(Some(CATALOG), "EDA");
    assert_eq!(resolution.origin, TemplateOrigin::Requested("EDA".to_string()));
    assert_eq!(functions(&resolution.entries), vec!["设计导入", "时序分析", "功耗分析"]);
    assert_eq!(resolution.entries[1].points, "检查关键路径");
}

#[test]
fn test_requested_by_full_heading_text() {
    let resolution = resolve_text(Some(CATALOG), "EDA 工具类");
    assert_eq!(resolution.origin, TemplateOrigin::Requested("EDA 工具类".to_string()));
    assert_eq!(functions(&resolution.entries), vec!["设计导入", "时序分析", "功耗分析"]);
    assert_eq!(find_template_block(CATALOG, "eda 工具类").map(|e| e.len()), Some(3));
}

#[test]
fn test_missing_template_falls_back_to_default() {
    let resolution = resolve_text(Some(CATALOG), "nonexistent");
    assert_eq!(resolution.origin, TemplateOrigin::CatalogDefault);
    assert_eq!(functions(&resolution.entries), vec!["默认一", "默认二"]);
}

#[test]
fn test_missing_catalog_uses_builtin() {
    let tmp = tempfile::tempdir().unwrap();
    let resolution = resolve(&tmp.path().join("templates.md"), "EDA");
    assert_eq!(resolution.origin, TemplateOrigin::BuiltIn);
    assert_eq!(resolution.entries, builtin_entries());
    assert_eq!(resolution.entries.len(), BUILTIN_ITEMS.len());
    assert_eq!(resolution.entries[0].function, "功能完整性测试");
}

#[test]
fn test_resolve_reads_catalog_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path: PathBuf = tmp.path().join("templates.md");
    std::fs::write(&path, CATALOG).unwrap();

    let resolution = resolve(&path, "eda");
    assert_eq!(resolution.entries.len(), 3);
}

#[test]
fn test_lookup_ignores_case_and_first_section_wins() {
    let resolution = resolve(&InlineCatalog(CATALOG), "eda");
    assert_eq!(resolution.origin, TemplateOrigin::Requested("eda".to_string()));
    assert_eq!(resolution.entries[0].function, "设计导入");
}

#[test]
fn test_empty_items_is_a_found_template() {
    let resolution = resolve_text(Some(CATALOG), "empty");
    assert_eq!(resolution.origin, TemplateOrigin::Requested("empty".to_string()));
    assert!(resolution.entries.is_empty());
}

#[test]
fn test_unusable_payloads_fall_back_to_default() {
    for name in ["broken", "noitems"] {
        let resolution = resolve_text(Some(CATALOG), name);
        assert_eq!(resolution.origin, TemplateOrigin::CatalogDefault, "template {}", name);
    }
}

#[test]
fn test_default_requested_without_default_section() {
    let catalog = "## other\n```json\n{\"items\": []}\n```\n";
    let resolution = resolve_text(Some(catalog), "default");
    assert_eq!(resolution.origin, TemplateOrigin::BuiltIn);
    assert_eq!(resolution.entries.len(), 6);
}

#[test]
fn test_broken_default_uses_builtin() {
    let catalog = "## default\n```json\n{\"items\": [\n```\n";
    let resolution = resolve_text(Some(catalog), "missing");
    assert_eq!(resolution.origin, TemplateOrigin::BuiltIn);
}

#[test]
fn test_preamble_json_is_not_a_template() {
    let catalog = Catalog::parse(CATALOG);
    let all: Vec<String> = catalog
        .sections()
        .iter()
        .filter_map(|s| catalog.entries(s).ok())
        .flatten()
        .map(|e| e.function)
        .collect();
    assert!(!all.contains(&"preamble".to_string()));
}

#[test]
fn test_section_names_in_catalog_order() {
    let catalog = Catalog::parse(CATALOG);
    let names: Vec<&str> = catalog.names().collect();
    assert_eq!(names, vec!["default", "EDA", "empty", "broken", "noitems", "eda"]);
    assert_eq!(catalog.sections()[1].title, "工具类");
}

#[test]
fn test_diagnostics_report_each_problem() {
    let catalog = Catalog::parse(CATALOG);
    let diagnostics = catalog.diagnostics();
    assert_eq!(diagnostics.len(), 3);
    assert!(matches!(&diagnostics[0], CatalogError::Malformed { name, .. } if name == "broken"));
    assert!(matches!(&diagnostics[1], CatalogError::MissingItems { name, .. } if name == "noitems"));
    assert!(matches!(&diagnostics[2], CatalogError::Duplicate { name, .. } if name == "eda"));
    assert!(diagnostics[2].is_warning());
}

#[test]
fn test_diagnostic_report_points_at_source() {
    let catalog = Catalog::parse(CATALOG);
    let diagnostics = catalog.diagnostics();
    let report = diagnostics[0].format(CATALOG, "catalog.md");
    assert!(report.contains("catalog.md"));
    assert!(report.contains("broken"));
}

#[test]
fn test_find_template_block() {
    assert_eq!(find_template_block(CATALOG, "default").map(|e| e.len()), Some(2));
    assert_eq!(find_template_block(CATALOG, "broken"), None);
    assert_eq!(find_template_block(CATALOG, "nonexistent"), None);
    assert_eq!(find_template_block(CATALOG, ""), None);
}

#[test]
fn test_shipped_catalog_is_clean() {
    let source = include_str!("../references/templates.md");
    let catalog = Catalog::parse(source);
    assert!(catalog.diagnostics().is_empty());
    assert_eq!(catalog.template("default").unwrap(), builtin_entries());
    assert_eq!(catalog.template("EDA").unwrap().len(), 5);
}
