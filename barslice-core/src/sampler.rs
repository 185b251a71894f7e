//! Contiguous random-window sampler.
//!
//! Picks `count` consecutive rows out of `n_rows`, always leaving at least
//! one row after the window for the next-close lookup.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::domain::{SampleSize, SampleWindow};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("table has {rows} row(s); at least 2 are needed to keep a bar after the window")]
    InsufficientRows { rows: usize },

    #[error("sample size must be at least 1 (got {0})")]
    InvalidSampleSize(usize),
}

/// Outcome of one sampling draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Count requested or drawn from the range, before clamping.
    pub drawn_count: usize,
    /// Effective window after clamping to `n_rows - 1`.
    pub window: SampleWindow,
}

impl Sample {
    pub fn was_clamped(&self) -> bool {
        self.window.count < self.drawn_count
    }
}

/// Resolve the requested count: the fixed value, or a uniform draw from
/// the normalized inclusive range.
pub fn draw_count<R: Rng>(size: &SampleSize, rng: &mut R) -> Result<usize, SampleError> {
    let (lo, hi) = size.normalized();
    if lo == 0 {
        return Err(SampleError::InvalidSampleSize(lo));
    }
    if lo == hi {
        return Ok(lo);
    }
    Ok(rng.gen_range(lo..=hi))
}

/// Choose a window over a table of `n_rows` rows.
pub fn sample_window<R: Rng>(
    n_rows: usize,
    size: &SampleSize,
    rng: &mut R,
) -> Result<Sample, SampleError> {
    let drawn_count = draw_count(size, rng)?;

    if n_rows < 2 {
        return Err(SampleError::InsufficientRows { rows: n_rows });
    }

    let count = drawn_count.min(n_rows - 1);
    let last_start = n_rows - count - 1;
    let start = if last_start == 0 {
        0
    } else {
        rng.gen_range(0..=last_start)
    };

    debug!(n_rows, drawn_count, count, start, "sampled window");
    Ok(Sample {
        drawn_count,
        window: SampleWindow { start, count },
    })
}
