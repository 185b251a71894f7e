//! Sampling parameters, windows and prediction targets.

use serde::{Deserialize, Serialize};

/// Largest count a user may request (fixed or as a range bound).
pub const MAX_SAMPLE_COUNT: usize = 1000;

/// How many rows to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SampleSize {
    /// Always extract exactly this many rows (subject to clamping).
    Fixed { count: usize },
    /// Draw the count uniformly from `min..=max` on every extraction.
    Range { min: usize, max: usize },
}

impl SampleSize {
    /// Range bounds with `min <= max`, swapping inverted input.
    ///
    /// A fixed size is reported as the degenerate range `(count, count)`.
    pub fn normalized(&self) -> (usize, usize) {
        match *self {
            SampleSize::Fixed { count } => (count, count),
            SampleSize::Range { min, max } if min > max => (max, min),
            SampleSize::Range { min, max } => (min, max),
        }
    }

    pub fn is_random(&self) -> bool {
        matches!(self, SampleSize::Range { .. })
    }
}

impl Default for SampleSize {
    fn default() -> Self {
        SampleSize::Fixed { count: 100 }
    }
}

/// A contiguous range of row indices `[start, start + count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    pub start: usize,
    pub count: usize,
}

impl SampleWindow {
    /// Exclusive end index.
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// Index of the last row inside the window.
    pub fn last(&self) -> usize {
        self.start + self.count - 1
    }
}

/// Which close price is reported next to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionTarget {
    /// Close of the row right after the window.
    #[default]
    NextBar,
    /// Close of the row stamped at the next 12:00:00 after the window.
    NextNoon,
}

impl PredictionTarget {
    pub fn toggled(self) -> Self {
        match self {
            PredictionTarget::NextBar => PredictionTarget::NextNoon,
            PredictionTarget::NextNoon => PredictionTarget::NextBar,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PredictionTarget::NextBar => "next bar",
            PredictionTarget::NextNoon => "next 12:00 bar",
        }
    }
}
