use crate::config::{ExportConfig, ResolverKind};
use crate::error::SiteSplitResult;
use crate::export::{ExportRequest, SiteSplitExporter};
use crate::scanner::{scan_template, ScanReport};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Route library logs to stderr; `--verbose` lowers the level to debug.
/// `RUST_LOG` wins when set.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "site_split=debug" } else { "site_split=warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Config file when given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> SiteSplitResult<ExportConfig> {
    match path {
        Some(path) => ExportConfig::from_yaml_file(path),
        None => Ok(ExportConfig::default()),
    }
}

/// Arguments of the fill command
#[derive(Debug, Clone, Default)]
pub struct FillOptions {
    pub template: Option<PathBuf>,
    /// JSON request body: `{"rows": ..., "shift": ..., "date": ...}`
    pub payload: PathBuf,
    /// Output file, or a directory to receive the suggested filename
    pub output: PathBuf,
    pub shift: Option<String>,
    pub date: Option<String>,
    pub config: Option<PathBuf>,
    pub static_map: Option<PathBuf>,
    pub verbose: bool,
}

/// Execute the fill command
pub fn fill(options: FillOptions) -> SiteSplitResult<PathBuf> {
    let mut config = load_config(options.config.as_deref())?;
    if let Some(template) = options.template {
        config.template_path = template;
    }
    if let Some(map) = options.static_map {
        config.resolver = ResolverKind::Static;
        config.static_map = Some(map);
    }

    println!("{}", "📊 Site Split - Filling template".bold().green());
    println!("   Template: {}", config.template_path.display());
    println!("   Payload:  {}", options.payload.display());
    println!();

    let mut request: ExportRequest = serde_json::from_str(&fs::read_to_string(&options.payload)?)?;
    if options.shift.is_some() {
        request.shift = options.shift;
    }
    if options.date.is_some() {
        request.date = options.date;
    }

    let exporter = SiteSplitExporter::new(config);
    let workbook = exporter.export(&request)?;

    let output = if options.output.is_dir() {
        options.output.join(&workbook.filename)
    } else {
        options.output
    };
    fs::write(&output, &workbook.bytes)?;

    if options.verbose {
        println!(
            "   Resolved {} labels, {} cells",
            workbook.mapping.len(),
            workbook.mapping.cell_count()
        );
        println!(
            "   Written: {}  Protected formulas: {}  Raw values: {}  Forced zero: {}",
            workbook.report.written,
            workbook.report.formulas_protected,
            workbook.report.raw_fallbacks,
            workbook.report.forced_zero
        );
        println!();
    }

    println!("{}", "✅ Workbook written".bold().green());
    println!("   {}\n", output.display());

    Ok(output)
}

/// Execute the scan command: print the resolved table to stdout
pub fn scan(template: &Path, config: Option<&Path>, verbose: bool) -> SiteSplitResult<ScanReport> {
    let config = load_config(config)?;
    let report = scan_template(template, &config.layout)?;

    if verbose {
        print_scan_details(&report);
    }
    println!("{}", report.render()?);

    Ok(report)
}

fn print_scan_details(report: &ScanReport) {
    println!("# Template: {}", report.template.display());
    println!("# Sheet:    {}", report.sheet.bright_blue());
    println!("# Anchor:   row {}", report.scan.anchor_row);
    for (dept, amzn, temp) in report.column_summary() {
        println!("#   {:<8} AMZN {:<3} TEMP {}", dept.name(), amzn, temp);
    }
    for (label, row) in &report.scan.label_rows {
        println!("#   row {:>3}  {}", row, label.trim());
    }
    let incomplete = report
        .scan
        .label_rows
        .len()
        .saturating_sub(report.scan.mapping.len());
    if incomplete > 0 {
        println!(
            "#   {}",
            format!("{} labels found without complete department columns", incomplete).yellow()
        );
    }
}
