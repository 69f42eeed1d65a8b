use crate::Verbosity;
use crate::output::change_values;
use anyhow::Result;
use ini_diff::{DiffReport, Difference};
use std::io::Write;
use std::path::Path;

pub fn write_text_report<W: Write>(
    w: &mut W,
    report: &DiffReport,
    path_a: &Path,
    path_b: &Path,
    verbosity: Verbosity,
) -> Result<()> {
    writeln!(
        w,
        "Comparing {} ({}) with {} ({})",
        report.label_a,
        path_a.display(),
        report.label_b,
        path_b.display()
    )?;
    writeln!(w)?;

    if report.is_empty() {
        writeln!(w, "No differences found.")?;
        write_summary(w, report, verbosity)?;
        return Ok(());
    }

    if verbosity != Verbosity::Quiet {
        for section in report.sections.keys() {
            writeln!(w, "[{}]", section)?;
            for (group, diffs) in report.grouped(section) {
                writeln!(w, "  {}:", group.title())?;
                for diff in diffs {
                    for line in render_difference(report, diff, verbosity) {
                        writeln!(w, "    {}", line)?;
                    }
                }
            }
            writeln!(w)?;
        }
    }

    write_summary(w, report, verbosity)?;

    Ok(())
}

fn render_difference(report: &DiffReport, diff: &Difference, verbosity: Verbosity) -> Vec<String> {
    let mut headline = diff.describe(&report.label_a, &report.label_b);
    if verbosity == Verbosity::Verbose {
        headline = format!("{} [{}]", headline, diff.category());
    }
    let mut lines = vec![headline];

    if let Difference::RowFieldMismatch { changes, .. } = diff {
        for change in changes {
            let (a, b) = change_values(change);
            lines.push(format!(
                "  {}: {} = {}, {} = {}",
                change.property, report.label_a, a, report.label_b, b
            ));
        }
    }

    lines
}

fn write_summary<W: Write>(w: &mut W, report: &DiffReport, verbosity: Verbosity) -> Result<()> {
    if verbosity == Verbosity::Quiet && report.is_empty() {
        return Ok(());
    }

    writeln!(w, "---")?;
    writeln!(w, "Summary:")?;
    writeln!(w, "  Total differences: {}", report.difference_count())?;
    writeln!(w, "  Sections with differences: {}", report.sections.len())?;
    for (category, count) in report.counts_by_category() {
        writeln!(w, "  {}: {}", category, count)?;
    }
    if !report.warnings.is_empty() {
        writeln!(w, "  Warnings: {}", report.warnings.len())?;
    }

    Ok(())
}
