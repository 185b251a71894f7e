//! barslice core: bar tables, window sampling and next-close lookup.
//!
//! This crate holds everything the TUI and CLI share:
//! - CSV loading into a row table with `timestamp` and `close` columns
//! - The data directory (listing, creation, file-manager open)
//! - Contiguous random-window sampling with an injected RNG
//! - Next-bar and next-12:00-bar close lookup
//! - Text rendering of the extracted rows
//! - TOML settings and reproducible per-extraction seeds

pub mod config;
pub mod data;
pub mod domain;
pub mod lookup;
pub mod render;
pub mod rng;
pub mod sampler;
pub mod session;

pub use config::{ConfigError, Settings, SETTINGS_FILE};
pub use data::{DataFormatError, DirError, DirListing};
pub use domain::{BarRow, BarTable, PredictionTarget, SampleSize, SampleWindow, MAX_SAMPLE_COUNT};
pub use lookup::{lookup, next_noon_after, LookupMiss, LookupOutcome};
pub use rng::ExtractionSeeds;
pub use sampler::{sample_window, Sample, SampleError};
pub use session::{extract_from_table, ExtractError, Extraction, Session};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: shared types are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<BarTable>();
        require_sync::<BarTable>();
        require_send::<Settings>();
        require_sync::<Settings>();
        require_send::<Extraction>();
        require_sync::<Extraction>();
        require_send::<Session>();
        require_sync::<Session>();
        require_send::<ExtractError>();
        require_sync::<ExtractError>();
    }
}
