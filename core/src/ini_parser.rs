//! Line-oriented parser for sectioned device configuration files.
//!
//! The grammar is evaluated one trimmed line at a time:
//!
//! ```text
//! [ SectionName ]                      section open
//! FORMAT Index = Col1, Col2, ...       table schema for the open section
//! Label 0 = v1, v2, ...                table row (only after FORMAT)
//! key = value                          setting (only before FORMAT)
//! [ \SectionName ]                     section close
//! ```
//!
//! Lines starting with `;` or `#` are comments. Anything that does not fit one
//! of the shapes above is skipped without error.

use crate::error::IniDiffError;
use crate::model::{Row, Section, Table};
use crate::ordered_map::OrderedMap;
use std::path::Path;

const FORMAT_PREFIX: &str = "FORMAT Index = ";

/// Reads `path` in full and parses it.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; vendor
/// exports are not always clean UTF-8.
pub fn read_sections(path: impl AsRef<Path>) -> Result<Vec<Section>, IniDiffError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| IniDiffError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(parse_sections(&text))
}

pub fn parse_sections(source: &str) -> Vec<Section> {
    let source = strip_leading_bom(source);
    let mut sections = Vec::new();
    let mut open: Option<OpenSection> = None;

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }

        match try_parse_marker(trimmed) {
            Some(Marker::Open(name)) => {
                if let Some(prev) = open.take() {
                    tracing::debug!(
                        section = %prev.name,
                        "section closed implicitly by next section"
                    );
                    sections.push(prev.finish());
                }
                open = Some(OpenSection::new(name));
                continue;
            }
            Some(Marker::Close(name)) => {
                match open.take() {
                    Some(section) => {
                        if section.name != name {
                            tracing::debug!(
                                open = %section.name,
                                close = %name,
                                "close marker name does not match open section"
                            );
                        }
                        sections.push(section.finish());
                    }
                    None => tracing::debug!(close = %name, "close marker outside any section"),
                }
                continue;
            }
            None => {}
        }

        let Some(section) = open.as_mut() else {
            continue;
        };

        if let Some(columns) = trimmed.strip_prefix(FORMAT_PREFIX) {
            section.table = Some(Table::new(split_values(columns)));
            continue;
        }

        match section.table.as_mut() {
            Some(table) => {
                if let Some(row) = parse_row(trimmed, table) {
                    table.rows.push(row);
                }
            }
            None => {
                if let Some((key, value)) = parse_key_value(trimmed) {
                    section.values.insert(key, value.to_string());
                }
            }
        }
    }

    if let Some(section) = open.take() {
        tracing::debug!(section = %section.name, "section closed at end of input");
        sections.push(section.finish());
    }

    sections
}

struct OpenSection {
    name: String,
    values: OrderedMap<String>,
    table: Option<Table>,
}

impl OpenSection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: OrderedMap::new(),
            table: None,
        }
    }

    fn finish(self) -> Section {
        match self.table {
            Some(table) => {
                let duplicates = table.duplicate_indices();
                if !duplicates.is_empty() {
                    tracing::warn!(
                        section = %self.name,
                        indices = ?duplicates,
                        "table has rows sharing the same Index"
                    );
                }
                tracing::debug!(section = %self.name, rows = table.len(), "parsed table section");
                Section::table(self.name, table)
            }
            None => {
                tracing::debug!(
                    section = %self.name,
                    keys = self.values.len(),
                    "parsed key/value section"
                );
                Section::key_value(self.name, self.values)
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Marker<'a> {
    Open(&'a str),
    Close(&'a str),
}

fn try_parse_marker(line: &str) -> Option<Marker<'_>> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    if let Some(name) = inner.strip_prefix('\\') {
        return Some(Marker::Close(name.trim()));
    }
    if inner.is_empty() {
        return None;
    }
    Some(Marker::Open(inner))
}

/// `<Label> <integer> = v1, v2, ...`
///
/// Values are assigned to the data columns in order; surplus values are
/// dropped and columns without a value stay unset.
fn parse_row(line: &str, table: &Table) -> Option<Row> {
    let (lhs, rhs) = line.split_once('=')?;
    let mut parts = lhs.split_whitespace();
    let _label = parts.next()?;
    let index = parts.next()?;
    if parts.next().is_some() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let fields = table
        .data_columns()
        .iter()
        .zip(split_values(rhs))
        .map(|(column, value)| (column.clone(), value))
        .collect();

    Some(Row::new(index, fields))
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

fn split_values(list: &str) -> Vec<String> {
    list.split(',').map(|v| v.trim().to_string()).collect()
}

fn is_comment(line: &str) -> bool {
    line.starts_with(';') || line.starts_with('#')
}

fn strip_leading_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}
