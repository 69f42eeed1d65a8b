//! Section, key and table-row comparison.
//!
//! The engine is a pure function of two parsed section sequences. Output order
//! is deterministic: the general bucket first, then common sections in the order
//! they appear in the first file.

use crate::config::{DiffConfig, RowMatching};
use crate::diff::{DiffReport, Difference, FieldChange, Side};
use crate::model::{INDEX_COLUMN, Row, Section, SectionContent, Table};
use crate::ordered_map::OrderedMap;
use rustc_hash::{FxHashMap, FxHashSet};

pub fn diff_sections(
    old: &[Section],
    new: &[Section],
    label_a: &str,
    label_b: &str,
    config: &DiffConfig,
) -> DiffReport {
    let mut report = DiffReport::new(label_a, label_b);
    let mut warnings = Vec::new();

    let old_by_name = index_sections(old, label_a, &mut warnings);
    let new_by_name = index_sections(new, label_b, &mut warnings);

    let mut general = Vec::new();
    for name in unique_names(old) {
        if !new_by_name.contains_key(name) {
            general.push(Difference::SectionOnlyInA {
                section: name.to_string(),
            });
        }
    }
    for name in unique_names(new) {
        if !old_by_name.contains_key(name) {
            general.push(Difference::SectionOnlyInB {
                section: name.to_string(),
            });
        }
    }
    if !general.is_empty() {
        report.sections.insert(config.general_bucket.clone(), general);
    }

    for name in unique_names(old) {
        let (Some(a), Some(b)) = (old_by_name.get(name), new_by_name.get(name)) else {
            continue;
        };
        let diffs = diff_section(a, b, config, &mut warnings);
        if diffs.is_empty() {
            continue;
        }
        if name == config.general_bucket && report.sections.contains_key(name) {
            warnings.push(format!(
                "section [{}] shares its report entry with section-existence differences",
                name
            ));
        }
        report
            .sections
            .get_or_insert_with(name, Vec::new)
            .extend(diffs);
    }

    tracing::debug!(
        sections = report.sections.len(),
        differences = report.difference_count(),
        "comparison finished"
    );

    report.warnings = warnings;
    report
}

/// First section of each name wins; later duplicates are reported as warnings.
fn index_sections<'a>(
    sections: &'a [Section],
    label: &str,
    warnings: &mut Vec<String>,
) -> FxHashMap<&'a str, &'a Section> {
    let mut by_name: FxHashMap<&str, &Section> = FxHashMap::default();
    for section in sections {
        if by_name.contains_key(section.name.as_str()) {
            warnings.push(format!(
                "{}: section [{}] appears more than once; only the first occurrence was compared",
                label, section.name
            ));
            continue;
        }
        by_name.insert(&section.name, section);
    }
    by_name
}

fn unique_names(sections: &[Section]) -> impl Iterator<Item = &str> {
    let mut seen = FxHashSet::default();
    sections
        .iter()
        .map(|s| s.name.as_str())
        .filter(move |name| seen.insert(*name))
}

fn diff_section(
    a: &Section,
    b: &Section,
    config: &DiffConfig,
    warnings: &mut Vec<String>,
) -> Vec<Difference> {
    match (&a.content, &b.content) {
        (SectionContent::KeyValue(va), SectionContent::KeyValue(vb)) => diff_key_values(va, vb),
        (SectionContent::Table(ta), SectionContent::Table(tb)) => {
            diff_tables(&a.name, ta, tb, config, warnings)
        }
        (SectionContent::KeyValue(va), SectionContent::Table(tb)) => diff_mixed(va, tb, Side::A),
        (SectionContent::Table(ta), SectionContent::KeyValue(vb)) => diff_mixed(vb, ta, Side::B),
    }
}

fn diff_key_values(a: &OrderedMap<String>, b: &OrderedMap<String>) -> Vec<Difference> {
    let mut diffs = Vec::new();

    for (key, value) in a.iter() {
        if !b.contains_key(key) {
            diffs.push(Difference::KeyOnlyInA {
                key: key.to_string(),
                value: value.clone(),
            });
        }
    }
    for (key, value) in b.iter() {
        if !a.contains_key(key) {
            diffs.push(Difference::KeyOnlyInB {
                key: key.to_string(),
                value: value.clone(),
            });
        }
    }
    for (key, value_a) in a.iter() {
        if let Some(value_b) = b.get(key) {
            if value_a != value_b {
                diffs.push(Difference::ValueMismatch {
                    key: key.to_string(),
                    value_a: value_a.clone(),
                    value_b: value_b.clone(),
                });
            }
        }
    }

    diffs
}

/// One side declared a `FORMAT` line, the other did not. The key/value side's
/// settings have no counterpart and it holds no rows. The kind change itself is
/// always reported as a display-column difference with no column on the
/// key/value side.
fn diff_mixed(values: &OrderedMap<String>, table: &Table, kv_side: Side) -> Vec<Difference> {
    let mut diffs: Vec<Difference> = values
        .iter()
        .map(|(key, value)| match kv_side {
            Side::A => Difference::KeyOnlyInA {
                key: key.to_string(),
                value: value.clone(),
            },
            Side::B => Difference::KeyOnlyInB {
                key: key.to_string(),
                value: value.clone(),
            },
        })
        .collect();
    if !table.is_empty() {
        diffs.push(Difference::TableEmptyVsNonEmpty {
            empty_side: kv_side,
            rows: table.len(),
        });
    }
    let table_column = table.display_column().map(str::to_string);
    let (column_a, column_b) = match kv_side {
        Side::A => (None, table_column),
        Side::B => (table_column, None),
    };
    diffs.push(Difference::DisplayColumnMismatch { column_a, column_b });
    diffs
}

fn diff_tables(
    section: &str,
    a: &Table,
    b: &Table,
    config: &DiffConfig,
    warnings: &mut Vec<String>,
) -> Vec<Difference> {
    let mut diffs = Vec::new();

    match (a.is_empty(), b.is_empty()) {
        (true, true) => return diffs,
        (true, false) => {
            diffs.push(Difference::TableEmptyVsNonEmpty {
                empty_side: Side::A,
                rows: b.len(),
            });
            return diffs;
        }
        (false, true) => {
            diffs.push(Difference::TableEmptyVsNonEmpty {
                empty_side: Side::B,
                rows: a.len(),
            });
            return diffs;
        }
        (false, false) => {}
    }

    let counts_differ = a.len() != b.len();
    if counts_differ {
        diffs.push(Difference::RowCountMismatch {
            rows_a: a.len(),
            rows_b: b.len(),
        });
    }

    if a.display_column() != b.display_column() {
        diffs.push(Difference::DisplayColumnMismatch {
            column_a: a.display_column().map(str::to_string),
            column_b: b.display_column().map(str::to_string),
        });
    }

    let columns = compared_columns(a, b);

    let by_index = counts_differ || config.row_matching == RowMatching::ByIndex;
    if by_index {
        diff_rows_by_index(section, a, b, &columns, &mut diffs, warnings);
    } else {
        // Equal row counts pair rows by position; Index tokens are not consulted.
        for (row_a, row_b) in a.rows.iter().zip(&b.rows) {
            if let Some(diff) = diff_row_pair(row_a, row_b, a, &columns) {
                diffs.push(diff);
            }
        }
    }

    diffs
}

/// Data columns of both schemas: A's order, then columns only B declares.
/// `Index` is the matching key, never a compared field.
fn compared_columns<'t>(a: &'t Table, b: &'t Table) -> Vec<&'t str> {
    let mut seen = FxHashSet::default();
    a.data_columns()
        .iter()
        .chain(b.data_columns())
        .map(String::as_str)
        .filter(|col| *col != INDEX_COLUMN && seen.insert(*col))
        .collect()
}

fn diff_rows_by_index(
    section: &str,
    a: &Table,
    b: &Table,
    columns: &[&str],
    diffs: &mut Vec<Difference>,
    warnings: &mut Vec<String>,
) {
    let rows_a = rows_by_index(section, a, Side::A, warnings);
    let rows_b = rows_by_index(section, b, Side::B, warnings);

    for (index, row) in rows_a.iter() {
        if !rows_b.contains_key(index) {
            diffs.push(Difference::RowOnlyInA {
                index: index.to_string(),
                display: row.display_value(a).map(str::to_string),
            });
        }
    }
    for (index, row) in rows_b.iter() {
        if !rows_a.contains_key(index) {
            diffs.push(Difference::RowOnlyInB {
                index: index.to_string(),
                display: row.display_value(b).map(str::to_string),
            });
        }
    }
    for (index, row_a) in rows_a.iter() {
        if let Some(row_b) = rows_b.get(index) {
            if let Some(diff) = diff_row_pair(row_a, row_b, a, columns) {
                diffs.push(diff);
            }
        }
    }
}

/// Rows keyed by Index in first-appearance order. With duplicate indices the
/// last row wins; the ambiguity is recorded as a warning.
fn rows_by_index<'t>(
    section: &str,
    table: &'t Table,
    side: Side,
    warnings: &mut Vec<String>,
) -> OrderedMap<&'t Row> {
    let mut rows = OrderedMap::new();
    let mut duplicated = Vec::new();
    for row in &table.rows {
        if rows.insert(row.index.as_str(), row).is_some() && !duplicated.contains(&row.index) {
            duplicated.push(row.index.clone());
        }
    }
    if !duplicated.is_empty() {
        warnings.push(format!(
            "[{}] side {:?}: duplicate row Index {}; index matching used the last row for each",
            section,
            side,
            duplicated.join(", ")
        ));
    }
    rows
}

/// Compares one matched pair. Every differing column is reported once, grouped
/// into a single difference for the row.
fn diff_row_pair(
    row_a: &Row,
    row_b: &Row,
    table_a: &Table,
    columns: &[&str],
) -> Option<Difference> {
    let changes: Vec<FieldChange> = columns
        .iter()
        .filter_map(|&column| {
            let value_a = row_a.value(column);
            let value_b = row_b.value(column);
            (value_a != value_b).then(|| FieldChange {
                property: column.to_string(),
                value_a: value_a.map(str::to_string),
                value_b: value_b.map(str::to_string),
            })
        })
        .collect();

    if changes.is_empty() {
        return None;
    }

    Some(Difference::RowFieldMismatch {
        index_a: row_a.index.clone(),
        index_b: row_b.index.clone(),
        display: row_a.display_value(table_a).map(str::to_string),
        changes,
    })
}
