//! Differences and reports for configuration comparison.
//!
//! This module defines the types produced by the diff engine:
//! - [`Difference`]: one typed discrepancy, tagged with its [`DiffCategory`] from creation
//! - [`DiffReport`]: the ordered per-section collection of differences for one run
//! - [`ReportGroup`]: the fixed presentation order of categories within a section

use crate::ordered_map::OrderedMap;
use serde::Serialize;

/// Which of the two compared files something refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiffCategory {
    SectionOnlyInA,
    SectionOnlyInB,
    KeyOnlyInA,
    KeyOnlyInB,
    ValueMismatch,
    TableEmptyVsNonEmpty,
    RowCountMismatch,
    DisplayColumnMismatch,
    RowOnlyInA,
    RowOnlyInB,
    RowFieldMismatch,
}

impl DiffCategory {
    pub const ALL: [DiffCategory; 11] = [
        DiffCategory::SectionOnlyInA,
        DiffCategory::SectionOnlyInB,
        DiffCategory::KeyOnlyInA,
        DiffCategory::KeyOnlyInB,
        DiffCategory::ValueMismatch,
        DiffCategory::TableEmptyVsNonEmpty,
        DiffCategory::RowCountMismatch,
        DiffCategory::DisplayColumnMismatch,
        DiffCategory::RowOnlyInA,
        DiffCategory::RowOnlyInB,
        DiffCategory::RowFieldMismatch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiffCategory::SectionOnlyInA => "SectionOnlyInA",
            DiffCategory::SectionOnlyInB => "SectionOnlyInB",
            DiffCategory::KeyOnlyInA => "KeyOnlyInA",
            DiffCategory::KeyOnlyInB => "KeyOnlyInB",
            DiffCategory::ValueMismatch => "ValueMismatch",
            DiffCategory::TableEmptyVsNonEmpty => "TableEmptyVsNonEmpty",
            DiffCategory::RowCountMismatch => "RowCountMismatch",
            DiffCategory::DisplayColumnMismatch => "DisplayColumnMismatch",
            DiffCategory::RowOnlyInA => "RowOnlyInA",
            DiffCategory::RowOnlyInB => "RowOnlyInB",
            DiffCategory::RowFieldMismatch => "RowFieldMismatch",
        }
    }

    pub fn group(self) -> ReportGroup {
        match self {
            DiffCategory::SectionOnlyInA | DiffCategory::SectionOnlyInB => {
                ReportGroup::SectionExistence
            }
            DiffCategory::KeyOnlyInA | DiffCategory::KeyOnlyInB => ReportGroup::MissingParameters,
            DiffCategory::ValueMismatch => ReportGroup::ValueMismatches,
            DiffCategory::RowCountMismatch => ReportGroup::RowCountMismatches,
            DiffCategory::TableEmptyVsNonEmpty => ReportGroup::EmptyTableMismatches,
            DiffCategory::RowOnlyInA | DiffCategory::RowOnlyInB => ReportGroup::MissingRows,
            DiffCategory::RowFieldMismatch => ReportGroup::RowFieldMismatches,
            DiffCategory::DisplayColumnMismatch => ReportGroup::Other,
        }
    }

    /// Swaps `*OnlyInA` with `*OnlyInB`; every other category maps to itself.
    pub fn mirrored(self) -> DiffCategory {
        match self {
            DiffCategory::SectionOnlyInA => DiffCategory::SectionOnlyInB,
            DiffCategory::SectionOnlyInB => DiffCategory::SectionOnlyInA,
            DiffCategory::KeyOnlyInA => DiffCategory::KeyOnlyInB,
            DiffCategory::KeyOnlyInB => DiffCategory::KeyOnlyInA,
            DiffCategory::RowOnlyInA => DiffCategory::RowOnlyInB,
            DiffCategory::RowOnlyInB => DiffCategory::RowOnlyInA,
            other => other,
        }
    }
}

impl std::fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation buckets, declared in the order reports render them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ReportGroup {
    SectionExistence,
    MissingParameters,
    ValueMismatches,
    RowCountMismatches,
    EmptyTableMismatches,
    MissingRows,
    RowFieldMismatches,
    Other,
}

impl ReportGroup {
    pub const ORDERED: [ReportGroup; 8] = [
        ReportGroup::SectionExistence,
        ReportGroup::MissingParameters,
        ReportGroup::ValueMismatches,
        ReportGroup::RowCountMismatches,
        ReportGroup::EmptyTableMismatches,
        ReportGroup::MissingRows,
        ReportGroup::RowFieldMismatches,
        ReportGroup::Other,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ReportGroup::SectionExistence => "Section mismatches",
            ReportGroup::MissingParameters => "Missing parameters",
            ReportGroup::ValueMismatches => "Value mismatches",
            ReportGroup::RowCountMismatches => "Row count mismatches",
            ReportGroup::EmptyTableMismatches => "Empty table mismatches",
            ReportGroup::MissingRows => "Missing rows",
            ReportGroup::RowFieldMismatches => "Row field mismatches",
            ReportGroup::Other => "Other differences",
        }
    }
}

/// One differing column of a matched row pair. `None` means the column has no
/// value on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub property: String,
    pub value_a: Option<String>,
    pub value_b: Option<String>,
}

/// A single discrepancy between the two configurations.
///
/// The section a difference belongs to is the key it is filed under in
/// [`DiffReport::sections`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Difference {
    SectionOnlyInA {
        section: String,
    },
    SectionOnlyInB {
        section: String,
    },
    KeyOnlyInA {
        key: String,
        value: String,
    },
    KeyOnlyInB {
        key: String,
        value: String,
    },
    ValueMismatch {
        key: String,
        value_a: String,
        value_b: String,
    },
    TableEmptyVsNonEmpty {
        empty_side: Side,
        /// Row count of the non-empty side.
        rows: usize,
    },
    RowCountMismatch {
        rows_a: usize,
        rows_b: usize,
    },
    DisplayColumnMismatch {
        column_a: Option<String>,
        column_b: Option<String>,
    },
    RowOnlyInA {
        index: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        display: Option<String>,
    },
    RowOnlyInB {
        index: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        display: Option<String>,
    },
    /// All differing columns of one matched row pair. Under positional matching
    /// `index_a` and `index_b` may differ.
    RowFieldMismatch {
        index_a: String,
        index_b: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        display: Option<String>,
        changes: Vec<FieldChange>,
    },
}

impl Difference {
    pub fn category(&self) -> DiffCategory {
        match self {
            Difference::SectionOnlyInA { .. } => DiffCategory::SectionOnlyInA,
            Difference::SectionOnlyInB { .. } => DiffCategory::SectionOnlyInB,
            Difference::KeyOnlyInA { .. } => DiffCategory::KeyOnlyInA,
            Difference::KeyOnlyInB { .. } => DiffCategory::KeyOnlyInB,
            Difference::ValueMismatch { .. } => DiffCategory::ValueMismatch,
            Difference::TableEmptyVsNonEmpty { .. } => DiffCategory::TableEmptyVsNonEmpty,
            Difference::RowCountMismatch { .. } => DiffCategory::RowCountMismatch,
            Difference::DisplayColumnMismatch { .. } => DiffCategory::DisplayColumnMismatch,
            Difference::RowOnlyInA { .. } => DiffCategory::RowOnlyInA,
            Difference::RowOnlyInB { .. } => DiffCategory::RowOnlyInB,
            Difference::RowFieldMismatch { .. } => DiffCategory::RowFieldMismatch,
        }
    }

    pub fn group(&self) -> ReportGroup {
        self.category().group()
    }

    /// One-line human-readable description using the report's file labels.
    pub fn describe(&self, label_a: &str, label_b: &str) -> String {
        let label = |side: Side| match side {
            Side::A => label_a,
            Side::B => label_b,
        };
        match self {
            Difference::SectionOnlyInA { section } => {
                format!("Section [{}] exists only in {}", section, label_a)
            }
            Difference::SectionOnlyInB { section } => {
                format!("Section [{}] exists only in {}", section, label_b)
            }
            Difference::KeyOnlyInA { key, value } => {
                format!("Parameter '{}' missing in {} ({} = {})", key, label_b, label_a, value)
            }
            Difference::KeyOnlyInB { key, value } => {
                format!("Parameter '{}' missing in {} ({} = {})", key, label_a, label_b, value)
            }
            Difference::ValueMismatch {
                key,
                value_a,
                value_b,
            } => format!(
                "Parameter '{}': {} = '{}', {} = '{}'",
                key, label_a, value_a, label_b, value_b
            ),
            Difference::TableEmptyVsNonEmpty { empty_side, rows } => format!(
                "Table is empty in {} but has {} row(s) in {}",
                label(*empty_side),
                rows,
                label(empty_side.other())
            ),
            Difference::RowCountMismatch { rows_a, rows_b } => format!(
                "Row count differs: {} has {}, {} has {}",
                label_a, rows_a, label_b, rows_b
            ),
            Difference::DisplayColumnMismatch { column_a, column_b } => format!(
                "First column differs: {} uses '{}', {} uses '{}'",
                label_a,
                column_a.as_deref().unwrap_or("<none>"),
                label_b,
                column_b.as_deref().unwrap_or("<none>")
            ),
            Difference::RowOnlyInA { index, display } => format!(
                "Row {}{} exists only in {}",
                index,
                display_suffix(display.as_deref()),
                label_a
            ),
            Difference::RowOnlyInB { index, display } => format!(
                "Row {}{} exists only in {}",
                index,
                display_suffix(display.as_deref()),
                label_b
            ),
            Difference::RowFieldMismatch {
                index_a,
                index_b,
                display,
                changes,
            } => {
                let row = if index_a == index_b {
                    format!("Row {}", index_a)
                } else {
                    format!("Row {} / {}", index_a, index_b)
                };
                let fields: Vec<&str> = changes.iter().map(|c| c.property.as_str()).collect();
                format!(
                    "{}{}: {} field(s) differ ({})",
                    row,
                    display_suffix(display.as_deref()),
                    changes.len(),
                    fields.join(", ")
                )
            }
        }
    }
}

fn display_suffix(display: Option<&str>) -> String {
    match display {
        Some(value) if !value.is_empty() => format!(" ({})", value),
        _ => String::new(),
    }
}

/// The complete result of comparing two configurations.
///
/// Sections appear in the order the engine visited them; sections without any
/// difference are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    /// Schema version (currently "1").
    pub version: String,
    pub label_a: String,
    pub label_b: String,
    pub sections: OrderedMap<Vec<Difference>>,
    /// Ambiguities found in the inputs (duplicate section names, duplicate row
    /// indices) and how the engine resolved them.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl DiffReport {
    pub const SCHEMA_VERSION: &'static str = "1";

    pub fn new(label_a: impl Into<String>, label_b: impl Into<String>) -> DiffReport {
        DiffReport {
            version: Self::SCHEMA_VERSION.to_string(),
            label_a: label_a.into(),
            label_b: label_b.into(),
            sections: OrderedMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn difference_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn differences(&self, section: &str) -> &[Difference] {
        self.sections.get(section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Difference)> {
        self.sections
            .iter()
            .flat_map(|(name, diffs)| diffs.iter().map(move |d| (name, d)))
    }

    /// Differences of `section` bucketed by [`ReportGroup`] in rendering order.
    /// Empty groups are omitted; order within a group is preserved.
    pub fn grouped(&self, section: &str) -> Vec<(ReportGroup, Vec<&Difference>)> {
        let diffs = self.differences(section);
        ReportGroup::ORDERED
            .iter()
            .filter_map(|&group| {
                let members: Vec<&Difference> =
                    diffs.iter().filter(|d| d.group() == group).collect();
                (!members.is_empty()).then_some((group, members))
            })
            .collect()
    }

    /// Number of differences per category, only for categories that occur.
    pub fn counts_by_category(&self) -> Vec<(DiffCategory, usize)> {
        DiffCategory::ALL
            .iter()
            .filter_map(|&category| {
                let count = self.iter().filter(|(_, d)| d.category() == category).count();
                (count > 0).then_some((category, count))
            })
            .collect()
    }
}
