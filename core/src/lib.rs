//! INI Diff: a library for comparing sectioned device configuration files.
//!
//! This crate provides functionality for:
//! - Parsing vendor configuration exports made of key/value sections and
//!   `FORMAT`-declared tables
//! - Computing section, parameter and table-row level differences between two files
//! - Grouping those differences for presentation
//!
//! # Quick Start
//!
//! ```no_run
//! use ini_diff::{ConfigDocument, DiffConfig};
//!
//! let primary = ConfigDocument::open("SBC1", "primary.ini")?;
//! let standby = ConfigDocument::open("SBC2", "standby.ini")?;
//! let report = primary.diff(&standby, &DiffConfig::default());
//!
//! for (section, difference) in report.iter() {
//!     println!("[{}] {}", section, difference.describe(&report.label_a, &report.label_b));
//! }
//! # Ok::<(), ini_diff::IniDiffError>(())
//! ```

mod config;
mod diff;
mod document;
mod engine;
mod error;
mod ini_parser;
mod model;
mod ordered_map;

pub use config::{ConfigError, DiffConfig, DiffConfigBuilder, RowMatching};
pub use diff::{DiffCategory, DiffReport, Difference, FieldChange, ReportGroup, Side};
pub use document::{ConfigDocument, DocumentSummary};
pub use engine::diff_sections;
pub use error::{IniDiffError, error_codes};
pub use ini_parser::{parse_sections, read_sections};
pub use model::{INDEX_COLUMN, Row, Section, SectionContent, SectionKind, Table};
pub use ordered_map::OrderedMap;
