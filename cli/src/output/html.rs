use crate::output::change_values;
use anyhow::Result;
use ini_diff::{DiffReport, Difference, ReportGroup};
use std::io::Write;
use std::path::Path;

const STYLE: &str = "\
body { font-family: Segoe UI, Helvetica, Arial, sans-serif; margin: 2em; color: #222; }
h1 { font-size: 1.6em; }
.files td { padding: 2px 12px 2px 0; }
.card { border: 1px solid #ccc; border-radius: 6px; padding: 0.5em 1.2em; margin: 1em 0; }
.card h2 { font-size: 1.2em; margin: 0.4em 0; }
.card h3 { font-size: 1em; color: #555; margin: 0.8em 0 0.3em; }
.ok { color: #2a7a2a; font-weight: bold; }
.warn { color: #9a6200; }
table.fields { border-collapse: collapse; margin: 0.3em 0 0.8em 1.5em; }
table.fields th, table.fields td { border: 1px solid #ddd; padding: 3px 8px; text-align: left; }
table.fields th { background: #f3f3f3; }
.unset { color: #999; font-style: italic; }
";

pub fn write_html_report<W: Write>(
    w: &mut W,
    report: &DiffReport,
    path_a: &Path,
    path_b: &Path,
) -> Result<()> {
    let title = format!(
        "Configuration comparison: {} vs {}",
        report.label_a, report.label_b
    );

    writeln!(w, "<!DOCTYPE html>")?;
    writeln!(w, "<html lang=\"en\">")?;
    writeln!(w, "<head>")?;
    writeln!(w, "<meta charset=\"utf-8\">")?;
    writeln!(w, "<title>{}</title>", escape_html(&title))?;
    writeln!(w, "<style>\n{}</style>", STYLE)?;
    writeln!(w, "</head>")?;
    writeln!(w, "<body>")?;
    writeln!(w, "<h1>{}</h1>", escape_html(&title))?;

    writeln!(w, "<table class=\"files\">")?;
    for (label, path) in [(&report.label_a, path_a), (&report.label_b, path_b)] {
        writeln!(
            w,
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
            escape_html(label),
            escape_html(&path.display().to_string())
        )?;
    }
    writeln!(w, "</table>")?;

    if report.is_empty() {
        writeln!(w, "<p class=\"ok\">No differences found.</p>")?;
    } else {
        write_summary(w, report)?;
        for section in report.sections.keys() {
            write_section(w, report, section)?;
        }
    }

    if !report.warnings.is_empty() {
        writeln!(w, "<h2 class=\"warn\">Warnings</h2>")?;
        writeln!(w, "<ul class=\"warn\">")?;
        for warning in &report.warnings {
            writeln!(w, "<li>{}</li>", escape_html(warning))?;
        }
        writeln!(w, "</ul>")?;
    }

    writeln!(w, "</body>")?;
    writeln!(w, "</html>")?;
    Ok(())
}

fn write_summary<W: Write>(w: &mut W, report: &DiffReport) -> Result<()> {
    writeln!(
        w,
        "<p>{} difference(s) in {} section(s).</p>",
        report.difference_count(),
        report.sections.len()
    )?;
    writeln!(w, "<ul>")?;
    for (category, count) in report.counts_by_category() {
        writeln!(w, "<li>{}: {}</li>", category, count)?;
    }
    writeln!(w, "</ul>")?;
    Ok(())
}

fn write_section<W: Write>(w: &mut W, report: &DiffReport, section: &str) -> Result<()> {
    writeln!(w, "<div class=\"card\">")?;
    writeln!(w, "<h2>[{}]</h2>", escape_html(section))?;

    for (group, diffs) in report.grouped(section) {
        writeln!(w, "<h3>{}</h3>", group.title())?;
        if group == ReportGroup::RowFieldMismatches {
            for diff in diffs {
                write_row_mismatch(w, report, diff)?;
            }
            continue;
        }
        writeln!(w, "<ul>")?;
        for diff in diffs {
            writeln!(
                w,
                "<li>{}</li>",
                escape_html(&diff.describe(&report.label_a, &report.label_b))
            )?;
        }
        writeln!(w, "</ul>")?;
    }

    writeln!(w, "</div>")?;
    Ok(())
}

fn write_row_mismatch<W: Write>(w: &mut W, report: &DiffReport, diff: &Difference) -> Result<()> {
    writeln!(
        w,
        "<p>{}</p>",
        escape_html(&diff.describe(&report.label_a, &report.label_b))
    )?;

    let Difference::RowFieldMismatch { changes, .. } = diff else {
        return Ok(());
    };

    writeln!(w, "<table class=\"fields\">")?;
    writeln!(
        w,
        "<tr><th>Property</th><th>{}</th><th>{}</th></tr>",
        escape_html(&report.label_a),
        escape_html(&report.label_b)
    )?;
    for change in changes {
        let (a, b) = change_values(change);
        writeln!(
            w,
            "<tr><td>{}</td>{}{}</tr>",
            escape_html(&change.property),
            value_cell(change.value_a.is_some(), a),
            value_cell(change.value_b.is_some(), b)
        )?;
    }
    writeln!(w, "</table>")?;
    Ok(())
}

fn value_cell(present: bool, value: &str) -> String {
    if present {
        format!("<td>{}</td>", escape_html(value))
    } else {
        format!("<td class=\"unset\">{}</td>", escape_html(value))
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
