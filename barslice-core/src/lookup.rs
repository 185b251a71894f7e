//! Next-bar and next-noon-bar close lookup.

use chrono::{Days, NaiveDateTime};

use crate::domain::{BarTable, PredictionTarget, SampleWindow};

/// Why a lookup produced no close. Both are normal, user-visible outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMiss {
    /// No row exists after the window.
    NoBarAfterWindow,
    /// No row is stamped exactly at the computed 12:00:00 target.
    NoNoonBar { target: NaiveDateTime },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupOutcome {
    NextBar {
        index: usize,
        close: f64,
    },
    NextNoon {
        index: usize,
        timestamp: NaiveDateTime,
        close: f64,
    },
    NotFound(LookupMiss),
}

impl LookupOutcome {
    pub fn close(&self) -> Option<f64> {
        match self {
            LookupOutcome::NextBar { close, .. } | LookupOutcome::NextNoon { close, .. } => {
                Some(*close)
            }
            LookupOutcome::NotFound(_) => None,
        }
    }
}

/// First 12:00:00 instant strictly after `ts`.
///
/// A `ts` already at 12:00:00 maps to noon of the following day.
/// Returns `None` only when the next day is out of chrono's range.
pub fn next_noon_after(ts: NaiveDateTime) -> Option<NaiveDateTime> {
    let noon = ts.date().and_hms_opt(12, 0, 0)?;
    if noon > ts {
        Some(noon)
    } else {
        noon.checked_add_days(Days::new(1))
    }
}

/// Resolve the close reported next to `window`.
pub fn lookup(table: &BarTable, window: &SampleWindow, target: PredictionTarget) -> LookupOutcome {
    match target {
        PredictionTarget::NextBar => next_bar(table, window),
        PredictionTarget::NextNoon => next_noon(table, window),
    }
}

fn next_bar(table: &BarTable, window: &SampleWindow) -> LookupOutcome {
    let index = window.end();
    match table.row(index) {
        Some(row) => LookupOutcome::NextBar {
            index,
            close: row.close,
        },
        None => LookupOutcome::NotFound(LookupMiss::NoBarAfterWindow),
    }
}

fn next_noon(table: &BarTable, window: &SampleWindow) -> LookupOutcome {
    if window.count == 0 {
        return LookupOutcome::NotFound(LookupMiss::NoBarAfterWindow);
    }
    let Some(last) = table.row(window.last()) else {
        return LookupOutcome::NotFound(LookupMiss::NoBarAfterWindow);
    };
    let Some(target) = next_noon_after(last.timestamp) else {
        return LookupOutcome::NotFound(LookupMiss::NoBarAfterWindow);
    };

    match table.find_timestamp(target) {
        Some((index, row)) => LookupOutcome::NextNoon {
            index,
            timestamp: row.timestamp,
            close: row.close,
        },
        None => LookupOutcome::NotFound(LookupMiss::NoNoonBar { target }),
    }
}
