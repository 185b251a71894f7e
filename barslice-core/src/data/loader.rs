//! CSV → BarTable loader.
//!
//! Reads a comma-delimited file with a header row. Every column is kept as
//! raw text; `timestamp` and `close` must be present and are parsed once
//! here. Any row that fails to parse fails the whole load.

use std::io;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{BarRow, BarTable};

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const CLOSE_COLUMN: &str = "close";

/// Errors raised while turning a file into a [`BarTable`].
///
/// `source` names the file (or reader) being loaded so messages are
/// displayable as-is in the TUI status bar.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("cannot read {source_name}: {error}")]
    Read { source_name: String, error: csv::Error },

    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },

    #[error("{source_name}: malformed record at line {line}: {error}")]
    Record {
        source_name: String,
        line: usize,
        error: csv::Error,
    },

    #[error("{source_name}: unparsable timestamp '{value}' at line {line}")]
    Timestamp {
        source_name: String,
        line: usize,
        value: String,
    },

    #[error("{source_name}: unparsable close '{value}' at line {line}")]
    Close {
        source_name: String,
        line: usize,
        value: String,
    },
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse an ISO-8601 style timestamp.
///
/// Offset-bearing values keep their own wall-clock time, so an hour of 12
/// in the file is an hour of 12 for the noon lookup. Date-only values
/// map to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Load a CSV file from disk.
pub fn load_table(path: &Path) -> Result<BarTable, DataFormatError> {
    let source_name = path.display().to_string();
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|error| DataFormatError::Read {
            source_name: source_name.clone(),
            error,
        })?;
    let table = read_records(reader, &source_name)?;
    info!(path = %source_name, rows = table.len(), "loaded bar table");
    Ok(table)
}

/// Load CSV content from any reader. `source_name` is used in error text.
pub fn load_table_from_reader<R: io::Read>(
    rdr: R,
    source_name: &str,
) -> Result<BarTable, DataFormatError> {
    let reader = csv::ReaderBuilder::new().has_headers(true).from_reader(rdr);
    read_records(reader, source_name)
}

fn read_records<R: io::Read>(
    mut reader: csv::Reader<R>,
    source_name: &str,
) -> Result<BarTable, DataFormatError> {
    let headers = reader
        .headers()
        .map_err(|error| DataFormatError::Read {
            source_name: source_name.to_string(),
            error,
        })?
        .clone();
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

    let ts_col = column_index(&columns, TIMESTAMP_COLUMN, source_name)?;
    let close_col = column_index(&columns, CLOSE_COLUMN, source_name)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = i + 2;
        let record = result.map_err(|error| DataFormatError::Record {
            source_name: source_name.to_string(),
            line,
            error,
        })?;

        let raw_ts = record.get(ts_col).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| DataFormatError::Timestamp {
            source_name: source_name.to_string(),
            line,
            value: raw_ts.to_string(),
        })?;

        let raw_close = record.get(close_col).unwrap_or_default();
        let close = raw_close
            .trim()
            .parse::<f64>()
            .map_err(|_| DataFormatError::Close {
                source_name: source_name.to_string(),
                line,
                value: raw_close.to_string(),
            })?;

        rows.push(BarRow {
            timestamp,
            close,
            fields: record.iter().map(|f| f.trim().to_string()).collect(),
        });
    }

    debug!(source = source_name, columns = columns.len(), rows = rows.len(), "parsed csv");
    Ok(BarTable::new(columns, rows))
}

fn column_index(
    columns: &[String],
    name: &'static str,
    source_name: &str,
) -> Result<usize, DataFormatError> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| DataFormatError::MissingColumn {
            source_name: source_name.to_string(),
            column: name,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn load(csv: &str) -> Result<BarTable, DataFormatError> {
        load_table_from_reader(csv.as_bytes(), "test.csv")
    }

    #[test]
    fn loads_all_columns_in_header_order() {
        let table = load(
            "timestamp,open,high,low,close,volume\n\
             2024-01-01 09:00:00,1,2,0.5,1.5,100\n\
             2024-01-01 10:00:00,1.5,2.5,1,2,120\n",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.columns(),
            &["timestamp", "open", "high", "low", "close", "volume"]
        );
        assert_eq!(table.rows()[1].close, 2.0);
        assert_eq!(table.value(0, "volume"), Some("100"));
    }

    #[test]
    fn missing_close_column_is_rejected() {
        let err = load("timestamp,open\n2024-01-01 09:00:00,1\n").unwrap_err();
        assert!(matches!(
            err,
            DataFormatError::MissingColumn { column: "close", .. }
        ));
        assert!(err.to_string().contains("close"));
    }

    #[test]
    fn missing_timestamp_column_is_rejected() {
        let err = load("date,close\n2024-01-01,1\n").unwrap_err();
        assert!(matches!(
            err,
            DataFormatError::MissingColumn { column: "timestamp", .. }
        ));
    }

    #[test]
    fn unparsable_close_reports_line() {
        let err = load(
            "timestamp,close\n\
             2024-01-01 09:00:00,1\n\
             2024-01-01 10:00:00,abc\n",
        )
        .unwrap_err();
        match err {
            DataFormatError::Close { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("expected Close error, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_timestamp_is_rejected() {
        let err = load("timestamp,close\nyesterday,1\n").unwrap_err();
        assert!(matches!(err, DataFormatError::Timestamp { line: 2, .. }));
    }

    #[test]
    fn ragged_record_is_rejected() {
        let err = load("timestamp,close\n2024-01-01 09:00:00,1,extra\n").unwrap_err();
        assert!(matches!(err, DataFormatError::Record { .. }));
    }

    #[test]
    fn header_only_file_is_empty_table() {
        let table = load("timestamp,close\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn header_names_are_trimmed() {
        let table = load("timestamp, close\n2024-01-01 09:00:00, 3.5\n").unwrap();
        assert_eq!(table.rows()[0].close, 3.5);
    }

    #[test]
    fn timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        for raw in [
            "2024-05-06 12:00:00",
            "2024-05-06T12:00:00",
            "2024-05-06 12:00",
            "2024-05-06T12:00:00.000",
            "2024-05-06T12:00:00Z",
            "2024-05-06T12:00:00+08:00",
            "2024-05-06 12:00:00+00:00",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "format {raw}");
        }
        let midnight = parse_timestamp("2024-05-06").unwrap();
        assert_eq!(midnight.hour(), 0);
        assert!(parse_timestamp("06/05/2024 noon").is_none());
    }
}
