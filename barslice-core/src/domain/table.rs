//! BarTable: the in-memory row table loaded from one CSV file.

use chrono::NaiveDateTime;

/// One bar (row) of a loaded table.
///
/// `fields` holds every column of the source row as raw text, in header
/// order. `timestamp` and `close` are parsed once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub timestamp: NaiveDateTime,
    pub close: f64,
    pub fields: Vec<String>,
}

/// Ordered, positionally indexed rows with named columns.
///
/// Row order is file order and is treated as chronological.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarTable {
    columns: Vec<String>,
    rows: Vec<BarRow>,
}

impl BarTable {
    pub fn new(columns: Vec<String>, rows: Vec<BarRow>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[BarRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&BarRow> {
        self.rows.get(index)
    }

    /// Raw text of a named column for one row.
    pub fn value(&self, index: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .get(index)
            .and_then(|r| r.fields.get(col))
            .map(String::as_str)
    }

    /// First row whose timestamp equals `ts` exactly.
    pub fn find_timestamp(&self, ts: NaiveDateTime) -> Option<(usize, &BarRow)> {
        self.rows.iter().enumerate().find(|(_, r)| r.timestamp == ts)
    }
}
