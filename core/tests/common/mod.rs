//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use ini_diff::{ConfigDocument, DiffCategory, DiffConfig, DiffReport, Difference};
use std::path::PathBuf;

pub fn fixture_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../fixtures");
    path.push(filename);
    path
}

pub fn open_fixture(label: &str, name: &str) -> ConfigDocument {
    let path = fixture_path(name);
    ConfigDocument::open(label, &path).unwrap_or_else(|e| {
        panic!("failed to open fixture {}: {e}", path.display());
    })
}

pub fn diff_texts(a: &str, b: &str) -> DiffReport {
    diff_texts_with(a, b, &DiffConfig::default())
}

pub fn diff_texts_with(a: &str, b: &str, config: &DiffConfig) -> DiffReport {
    let doc_a = ConfigDocument::parse("SBC1", a);
    let doc_b = ConfigDocument::parse("SBC2", b);
    doc_a.diff(&doc_b, config)
}

pub fn categories(report: &DiffReport, section: &str) -> Vec<DiffCategory> {
    report
        .differences(section)
        .iter()
        .map(Difference::category)
        .collect()
}

/// Builds a one-table file: `FORMAT Index = <columns>` followed by `Row <i> = <values>`.
pub fn table_file(section: &str, columns: &str, rows: &[(&str, &str)]) -> String {
    let mut text = format!("[ {section} ]\nFORMAT Index = {columns}\n");
    for (index, values) in rows {
        text.push_str(&format!("Row {index} = {values}\n"));
    }
    text.push_str(&format!("[ \\{section} ]\n"));
    text
}
