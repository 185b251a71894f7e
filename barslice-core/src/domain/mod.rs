//! Domain types: bar tables, sample windows, prediction targets.

pub mod sample;
pub mod table;

pub use sample::{PredictionTarget, SampleSize, SampleWindow, MAX_SAMPLE_COUNT};
pub use table::{BarRow, BarTable};
