use anyhow::{Context, Result};
use ini_diff::{ConfigDocument, SectionContent};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

pub fn run(path: &Path) -> Result<ExitCode> {
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let doc = ConfigDocument::open(filename, path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_info(&mut handle, &doc)?;

    Ok(ExitCode::SUCCESS)
}

fn write_info<W: Write>(w: &mut W, doc: &ConfigDocument) -> Result<()> {
    let summary = doc.summary();
    writeln!(w, "File: {}", doc.label)?;
    writeln!(
        w,
        "Sections: {} ({} key/value, {} tables)",
        summary.sections(),
        summary.key_value_sections,
        summary.table_sections
    )?;

    for section in &doc.sections {
        match &section.content {
            SectionContent::KeyValue(values) => {
                writeln!(w, "  - [{}] key/value, {} keys", section.name, values.len())?;
            }
            SectionContent::Table(table) => {
                writeln!(
                    w,
                    "  - [{}] table, {} rows (columns: {})",
                    section.name,
                    table.len(),
                    table.columns.join(", ")
                )?;
                let duplicates = table.duplicate_indices();
                if !duplicates.is_empty() {
                    writeln!(w, "      duplicate Index: {}", duplicates.join(", "))?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_sections_with_kind_and_size() {
        let doc = ConfigDocument::parse(
            "sbc.ini",
            "[A]\nx = 1\n[\\A]\n[T]\nFORMAT Index = Name\nRow 0 = a\nRow 0 = b\n[\\T]\n",
        );
        let mut out = Vec::new();
        write_info(&mut out, &doc).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("File: sbc.ini\nSections: 2 (1 key/value, 1 tables)\n"));
        assert!(text.contains("  - [A] key/value, 1 keys\n"));
        assert!(text.contains("  - [T] table, 2 rows (columns: Index, Name)\n"));
        assert!(text.contains("duplicate Index: 0"));
    }
}
