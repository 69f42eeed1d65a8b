//! Parsed representation of a sectioned configuration file.

use crate::ordered_map::OrderedMap;
use serde::Serialize;

/// Name of the synthetic first column of every table.
pub const INDEX_COLUMN: &str = "Index";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionKind {
    KeyValue,
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data")]
pub enum SectionContent {
    KeyValue(OrderedMap<String>),
    Table(Table),
}

/// One `[Name]` ... `[\Name]` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub content: SectionContent,
}

impl Section {
    pub fn key_value(name: impl Into<String>, values: OrderedMap<String>) -> Self {
        Self {
            name: name.into(),
            content: SectionContent::KeyValue(values),
        }
    }

    pub fn table(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            content: SectionContent::Table(table),
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self.content {
            SectionContent::KeyValue(_) => SectionKind::KeyValue,
            SectionContent::Table(_) => SectionKind::Table,
        }
    }

    pub fn as_key_value(&self) -> Option<&OrderedMap<String>> {
        match &self.content {
            SectionContent::KeyValue(values) => Some(values),
            SectionContent::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match &self.content {
            SectionContent::Table(table) => Some(table),
            SectionContent::KeyValue(_) => None,
        }
    }
}

/// Rows of a section that declared a `FORMAT Index = ...` schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Column schema; `columns[0]` is always [`INDEX_COLUMN`].
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(data_columns: Vec<String>) -> Self {
        let mut columns = Vec::with_capacity(data_columns.len() + 1);
        columns.push(INDEX_COLUMN.to_string());
        columns.extend(data_columns);
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn data_columns(&self) -> &[String] {
        self.columns.get(1..).unwrap_or(&[])
    }

    /// First declared column after `Index`, used to label rows in reports.
    pub fn display_column(&self) -> Option<&str> {
        self.columns.get(1).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index tokens that appear on more than one row, in first-appearance order.
    pub fn duplicate_indices(&self) -> Vec<String> {
        let mut seen: OrderedMap<usize> = OrderedMap::new();
        for row in &self.rows {
            *seen.get_or_insert_with(&row.index, || 0) += 1;
        }
        seen.iter()
            .filter(|(_, count)| **count > 1)
            .map(|(index, _)| index.to_string())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Opaque row identifier; compared for equality only.
    pub index: String,
    /// Data column values in schema order. Columns without a supplied value are absent.
    pub fields: OrderedMap<String>,
}

impl Row {
    pub fn new(index: impl Into<String>, fields: OrderedMap<String>) -> Self {
        Self {
            index: index.into(),
            fields,
        }
    }

    /// Looks up a column value, including the synthetic `Index` column.
    pub fn value(&self, column: &str) -> Option<&str> {
        if column == INDEX_COLUMN {
            return Some(&self.index);
        }
        self.fields.get(column).map(String::as_str)
    }

    pub fn display_value(&self, table: &Table) -> Option<&str> {
        table.display_column().and_then(|col| self.value(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: &str, name: &str) -> Row {
        Row::new(index, [("Name", name.to_string())].into_iter().collect())
    }

    #[test]
    fn index_is_always_first_column() {
        let table = Table::new(vec!["Name".into(), "Type".into()]);
        assert_eq!(table.columns, vec!["Index", "Name", "Type"]);
        assert_eq!(table.data_columns(), ["Name", "Type"]);
        assert_eq!(table.display_column(), Some("Name"));
    }

    #[test]
    fn table_without_data_columns_has_no_display_column() {
        let table = Table::new(Vec::new());
        assert_eq!(table.display_column(), None);
        assert!(table.data_columns().is_empty());
    }

    #[test]
    fn row_value_answers_index_column() {
        let r = row("7", "trunk");
        assert_eq!(r.value("Index"), Some("7"));
        assert_eq!(r.value("Name"), Some("trunk"));
        assert_eq!(r.value("Type"), None);
    }

    #[test]
    fn duplicate_indices_reported_once_each() {
        let mut table = Table::new(vec!["Name".into()]);
        table.rows = vec![row("0", "a"), row("1", "b"), row("0", "c"), row("0", "d")];
        assert_eq!(table.duplicate_indices(), vec!["0"]);
    }
}
