use crate::commands::CliError;
use crate::output::{html, json, text};
use crate::{OutputFormat, Verbosity};
use anyhow::{Context, Result};
use ini_diff::{ConfigDocument, DiffConfig, DiffReport};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

pub const DEFAULT_HTML_REPORT: &str = "ini_diff_report.html";

pub struct DiffArgs {
    pub file_a: PathBuf,
    pub file_b: PathBuf,
    pub name_a: String,
    pub name_b: String,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub match_by_index: bool,
    pub verbosity: Verbosity,
}

pub fn run(args: DiffArgs) -> Result<ExitCode> {
    let destination = resolve_destination(args.output, args.format);
    if let Some(path) = &destination {
        ensure_parent_exists(path)?;
    }

    let config = build_config(args.match_by_index);

    info!("Parsing {} ({})", args.file_a.display(), args.name_a);
    let doc_a = ConfigDocument::open(&args.name_a, &args.file_a)
        .with_context(|| format!("Failed to load {}", args.file_a.display()))?;
    info!("Parsing {} ({})", args.file_b.display(), args.name_b);
    let doc_b = ConfigDocument::open(&args.name_b, &args.file_b)
        .with_context(|| format!("Failed to load {}", args.file_b.display()))?;

    info!("Comparing {} with {}", doc_a.label, doc_b.label);
    let report = doc_a.diff(&doc_b, &config);
    info!(
        sections = report.sections.len(),
        differences = report.difference_count(),
        "Comparison complete"
    );

    print_warnings_to_stderr(&report);

    let rendered = render(&report, &args.file_a, &args.file_b, args.format, args.verbosity)?;

    match &destination {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&rendered)?;
            handle.flush()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_destination(output: Option<PathBuf>, format: OutputFormat) -> Option<PathBuf> {
    match (output, format) {
        (Some(path), _) => Some(path),
        (None, OutputFormat::Html) => Some(PathBuf::from(DEFAULT_HTML_REPORT)),
        (None, OutputFormat::Text | OutputFormat::Json) => None,
    }
}

fn ensure_parent_exists(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            Err(CliError::OutputDirMissing {
                dir: dir.to_path_buf(),
            }
            .into())
        }
        _ => Ok(()),
    }
}

fn build_config(match_by_index: bool) -> DiffConfig {
    if match_by_index {
        DiffConfig::index_matching()
    } else {
        DiffConfig::default()
    }
}

/// Renders the whole report in memory so a failure never leaves a partial file.
fn render(
    report: &DiffReport,
    path_a: &Path,
    path_b: &Path,
    format: OutputFormat,
    verbosity: Verbosity,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Html => html::write_html_report(&mut buf, report, path_a, path_b)?,
        OutputFormat::Text => text::write_text_report(&mut buf, report, path_a, path_b, verbosity)?,
        OutputFormat::Json => json::write_json_report(&mut buf, report)?,
    }
    Ok(buf)
}

fn print_warnings_to_stderr(report: &DiffReport) {
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
}
