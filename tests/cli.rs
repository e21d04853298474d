//! Integration tests for the xingxin-test-doc binary

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn shipped_catalog() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("references/templates.md")
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xingxin-test-doc"))
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Should run binary")
}

#[test]
fn test_generates_named_report() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = shipped_catalog();
    let out = run(
        tmp.path(),
        &[
            "--user",
            "张三",
            "--date",
            "2024-01-01",
            "--catalog",
            catalog.to_str().unwrap(),
            "--output",
            "reports",
        ],
    );

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let path = tmp.path().join("reports").join("行芯产品验证文档-张三.docx");
    let bytes = std::fs::read(&path).expect("Should write report");
    assert!(bytes.starts_with(b"PK"));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("行芯产品验证文档-张三.docx"));
    assert!(stdout.contains("entries: 6"));
}

#[test]
fn test_missing_catalog_still_generates() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(tmp.path(), &["--user", "bob", "--template", "EDA"]);

    assert!(out.status.success());
    assert!(tmp.path().join("行芯产品验证文档-bob.docx").exists());
    assert!(String::from_utf8_lossy(&out.stdout).contains("built-in checklist"));
}

#[test]
fn test_unwritable_name_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(tmp.path(), &["--user", "no/such/dir"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error:"));
}

#[test]
fn test_user_is_required() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(tmp.path(), &["--product", "x"]);
    assert!(!out.status.success());
}

#[test]
fn test_empty_user_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(tmp.path(), &["--user", ""]);
    assert!(!out.status.success());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_date_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(tmp.path(), &["--user", "bob", "--date", "2024-13-40"]);
    assert!(!out.status.success());
    assert!(!tmp.path().join("行芯产品验证文档-bob.docx").exists());
}

#[test]
fn test_preview_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = fixture("catalog.md");
    let out = run(
        tmp.path(),
        &["--user", "张三", "--catalog", catalog.to_str().unwrap(), "--template", "EDA", "--preview"],
    );

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("# 行芯产品验证文档"));
    assert!(stdout.contains("even | 设计导入 | 验证文件导入 |"));
    assert!(stdout.contains("odd  | 时序分析 | 检查关键路径 |"));
    assert!(stdout.contains("(3 entries from catalog template 'EDA')"));
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn test_check_reports_problems() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = fixture("catalog.md");
    let out = run(tmp.path(), &["--check", "--catalog", catalog.to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("6 sections, 3 problems"));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("broken"));
    assert!(stderr.contains("duplicate section 'eda'"));
}

#[test]
fn test_check_clean_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = shipped_catalog();
    let out = run(tmp.path(), &["--check", "--catalog", catalog.to_str().unwrap()]);

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("3 sections, 0 problems"));
}

#[test]
fn test_list_templates() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = fixture("catalog.md");
    let out = run(tmp.path(), &["--list-templates", "--catalog", catalog.to_str().unwrap()]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("default"));
    assert!(lines[0].contains("2 items"));
    assert!(lines[2].contains("0 items"));
    assert!(lines[3].contains("invalid"));
    assert!(lines[5].contains("shadowed"));
}

#[test]
fn test_list_templates_unreadable_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run(tmp.path(), &["--list-templates", "--catalog", "missing.md"]);
    assert_eq!(out.status.code(), Some(1));
}
