use crate::config::DiffConfig;
use crate::diff::DiffReport;
use crate::error::IniDiffError;
use crate::model::{Section, SectionKind};
use std::path::Path;

/// One parsed configuration file together with the label used for it in reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub label: String,
    pub sections: Vec<Section>,
}

impl ConfigDocument {
    pub fn parse(label: impl Into<String>, text: &str) -> Self {
        Self {
            label: label.into(),
            sections: crate::ini_parser::parse_sections(text),
        }
    }

    pub fn open(label: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, IniDiffError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading configuration");
        Ok(Self {
            label: label.into(),
            sections: crate::ini_parser::read_sections(path)?,
        })
    }

    /// First section with `name`, matching the lookup the diff engine uses.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Compares `self` (side A) against `other` (side B).
    pub fn diff(&self, other: &Self, config: &DiffConfig) -> DiffReport {
        crate::engine::diff_sections(
            &self.sections,
            &other.sections,
            &self.label,
            &other.label,
            config,
        )
    }

    pub fn summary(&self) -> DocumentSummary {
        let mut summary = DocumentSummary::default();
        for section in &self.sections {
            match section.kind() {
                SectionKind::KeyValue => {
                    summary.key_value_sections += 1;
                    summary.keys += section.as_key_value().map_or(0, |v| v.len());
                }
                SectionKind::Table => {
                    summary.table_sections += 1;
                    summary.rows += section.as_table().map_or(0, |t| t.len());
                }
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub key_value_sections: usize,
    pub table_sections: usize,
    pub keys: usize,
    pub rows: usize,
}

impl DocumentSummary {
    pub fn sections(&self) -> usize {
        self.key_value_sections + self.table_sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[SYSTEM Params]
SyslogServerIP = 10.1.1.1
EnableSyslog = 1
[\\SYSTEM Params]

[ IPGroup ]
FORMAT Index = Name, Type
IPGroup 0 = Core, SERVER
IPGroup 1 = Edge, USER
[ \\IPGroup ]
";

    #[test]
    fn summary_counts_sections_keys_and_rows() {
        let doc = ConfigDocument::parse("SBC1", SAMPLE);
        assert_eq!(
            doc.summary(),
            DocumentSummary {
                key_value_sections: 1,
                table_sections: 1,
                keys: 2,
                rows: 2,
            }
        );
        assert_eq!(doc.summary().sections(), 2);
    }

    #[test]
    fn section_lookup_by_name() {
        let doc = ConfigDocument::parse("SBC1", SAMPLE);
        assert_eq!(doc.section("IPGroup").map(Section::kind), Some(SectionKind::Table));
        assert!(doc.section("Missing").is_none());
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let err = ConfigDocument::open("SBC1", "definitely/not/here.ini").unwrap_err();
        assert!(matches!(err, IniDiffError::NotFound { .. }));
        assert_eq!(err.code(), "INIDIFF_IO_001");
    }
}
