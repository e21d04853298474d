//! xingxin-test-doc CLI
//!
//! Usage:
//!   xingxin-test-doc --user <NAME> [OPTIONS]
//!
//! Options:
//!   -u, --user <NAME>         Tester name (required)
//!       --version <VERSION>   Product version [default: v1.0.0]
//!   -p, --product <NAME>      Product name [default: 行芯产品]
//!   -d, --date <YYYY-MM-DD>   Test date [default: today]
//!   -t, --template <NAME>     Checklist template [default: default]
//!   -o, --output <DIR>        Output directory [default: .]
//!   -c, --catalog <FILE>      Template catalog [default: references/templates.md]
//!       --logo <FILE>         Header logo [default: assets/logo.png]
//!       --theme <FILE>        Theme file (TOML)
//!       --preview             Print an outline instead of writing the file
//!       --check               Validate the catalog and exit
//!       --list-templates      List catalog templates and exit

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xingxin_test_doc::document::{DEFAULT_PRODUCT, DEFAULT_VERSION};
use xingxin_test_doc::template::DEFAULT_TEMPLATE;
use xingxin_test_doc::{
    generate, prepare, render_outline, Catalog, ReportConfig, ReportError, ReportMetadata, Theme,
};

#[derive(Parser)]
#[command(name = "xingxin-test-doc")]
#[command(about = "Generate product verification report documents (.docx)")]
struct Cli {
    /// Tester name, printed in the report and used in the file name
    #[arg(
        short,
        long,
        required_unless_present_any = ["check", "list_templates"],
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    user: Option<String>,

    /// Product version
    #[arg(long, default_value = DEFAULT_VERSION)]
    version: String,

    /// Product name
    #[arg(short, long, default_value = DEFAULT_PRODUCT)]
    product: String,

    /// Test date (YYYY-MM-DD), today if omitted
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Checklist template name in the catalog
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    template: String,

    /// Directory the report is written to (created if missing)
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Template catalog file
    #[arg(short, long, default_value = "references/templates.md")]
    catalog: PathBuf,

    /// Logo shown in the page header; skipped if the file is missing
    #[arg(long, default_value = "assets/logo.png")]
    logo: PathBuf,

    /// Theme file for branding, colors and fonts (TOML format)
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Print an outline of the report instead of writing it
    #[arg(long)]
    preview: bool,

    /// Validate the template catalog and exit
    #[arg(long)]
    check: bool,

    /// List the templates in the catalog and exit
    #[arg(long)]
    list_templates: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected a date like 2024-01-31: {}", e))
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("xingxin_test_doc=info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.list_templates {
        list_templates(&cli.catalog);
        return;
    }

    if cli.check {
        check_catalog(&cli.catalog);
        return;
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ReportError> {
    let theme = match &cli.theme {
        Some(path) => Theme::from_file(path)?,
        None => Theme::default(),
    };

    let date = cli
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive())
        .to_string();
    let metadata = ReportMetadata::new(cli.user.unwrap_or_default(), date)
        .with_version(cli.version)
        .with_product(cli.product)
        .with_template(cli.template);

    let config = ReportConfig::new()
        .with_catalog(cli.catalog)
        .with_logo(Some(cli.logo))
        .with_theme(theme)
        .with_output_dir(cli.output);

    info!(
        user = %metadata.user,
        product = %metadata.product,
        version = %metadata.version,
        date = %metadata.date,
        template = %metadata.template,
        output = %config.output_dir.display(),
        "generating report"
    );

    if cli.preview {
        let report = prepare(&metadata, &config);
        print!("{}", render_outline(&report.model));
        println!(
            "\n({} entries from {})",
            report.resolution.entries.len(),
            report.resolution.origin
        );
        return Ok(());
    }

    let generated = generate(&metadata, &config)?;
    println!("Report generated");
    println!("  file:    {}", generated.file_name);
    println!("  path:    {}", generated.path.display());
    println!("  entries: {} ({})", generated.entry_count, generated.origin);
    Ok(())
}

fn read_catalog(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading catalog '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

fn list_templates(path: &Path) {
    let source = read_catalog(path);
    let catalog = Catalog::parse(&source);

    for (index, section) in catalog.sections().iter().enumerate() {
        let shadowed = catalog.sections()[..index]
            .iter()
            .any(|earlier| earlier.is_named(&section.name));
        let status = if shadowed {
            "shadowed".to_string()
        } else {
            match catalog.entries(section) {
                Ok(entries) => format!("{} items", entries.len()),
                Err(_) => "invalid".to_string(),
            }
        };
        println!("{:<20} {:<10} {}", section.name, status, section.title);
    }
}

fn check_catalog(path: &Path) {
    let source = read_catalog(path);
    let catalog = Catalog::parse(&source);
    let diagnostics = catalog.diagnostics();
    let filename = path.display().to_string();

    for diagnostic in &diagnostics {
        eprint!("{}", diagnostic.format(catalog.source(), &filename));
    }

    println!(
        "{}: {} sections, {} problems",
        filename,
        catalog.sections().len(),
        diagnostics.len()
    );
    if !diagnostics.is_empty() {
        std::process::exit(1);
    }
}
