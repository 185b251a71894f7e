//! Session: the explicit state one user works against.
//!
//! Holds the data directory listing, the selected file, the table loaded
//! from it, the sampling parameters and the last extraction. The TUI owns
//! exactly one `Session`; the CLI builds one per invocation.

use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::data::{list_csv_files, load_table, DataFormatError, DirError, DirListing};
use crate::domain::{BarTable, PredictionTarget, SampleSize};
use crate::lookup::{lookup, LookupOutcome};
use crate::render::{drawn_count_text, prediction_text, render_rows};
use crate::rng::ExtractionSeeds;
use crate::sampler::{sample_window, Sample, SampleError};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no data file selected")]
    NoFileSelected,

    #[error(transparent)]
    DataFormat(#[from] DataFormatError),

    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// Result of one extraction, ready for display.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub file_name: String,
    /// Extraction index the RNG was derived from, replayable with the
    /// master seed. `None` when the caller supplied the RNG.
    pub iteration: Option<u64>,
    pub sample: Sample,
    pub outcome: LookupOutcome,
    pub rows_text: String,
    pub prediction_text: String,
    /// Present for random-size extractions only.
    pub drawn_count_text: Option<String>,
}

/// Sample a window and resolve its lookup in one step.
pub fn extract_from_table<R: Rng>(
    table: &BarTable,
    size: &SampleSize,
    target: PredictionTarget,
    rng: &mut R,
) -> Result<(Sample, LookupOutcome), SampleError> {
    let sample = sample_window(table.len(), size, rng)?;
    let outcome = lookup(table, &sample.window, target);
    Ok((sample, outcome))
}

struct LoadedTable {
    file_name: String,
    table: BarTable,
}

pub struct Session {
    data_dir: PathBuf,
    listing: DirListing,
    selected: Option<usize>,
    loaded: Option<LoadedTable>,
    seeds: ExtractionSeeds,
    extractions: u64,
    last: Option<Extraction>,
    pub size: SampleSize,
    pub target: PredictionTarget,
}

impl Session {
    pub fn new(data_dir: impl Into<PathBuf>, seeds: ExtractionSeeds) -> Self {
        Self {
            data_dir: data_dir.into(),
            listing: DirListing::Empty,
            selected: None,
            loaded: None,
            seeds,
            extractions: 0,
            last: None,
            size: SampleSize::default(),
            target: PredictionTarget::default(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn seeds(&self) -> &ExtractionSeeds {
        &self.seeds
    }

    /// Index the next extraction will use.
    pub fn next_iteration(&self) -> u64 {
        self.extractions
    }

    pub fn listing(&self) -> &DirListing {
        &self.listing
    }

    pub fn files(&self) -> &[String] {
        self.listing.files()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_file(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.listing.files().get(i))
            .map(String::as_str)
    }

    pub fn last_extraction(&self) -> Option<&Extraction> {
        self.last.as_ref()
    }

    /// Text placed on the clipboard: the rows of the last extraction.
    pub fn copy_text(&self) -> Option<&str> {
        self.last.as_ref().map(|e| e.rows_text.as_str())
    }

    /// Re-read the data directory.
    ///
    /// Keeps the current selection when that file is still present,
    /// otherwise selects the first file. The loaded table is dropped so
    /// the next extraction reads the file again.
    pub fn refresh_files(&mut self) -> Result<&DirListing, DirError> {
        let previous = self.selected_file().map(str::to_string);
        self.loaded = None;

        let listing = match list_csv_files(&self.data_dir) {
            Ok(listing) => listing,
            Err(e) => {
                self.listing = DirListing::Empty;
                self.selected = None;
                return Err(e);
            }
        };

        self.selected = match &listing {
            DirListing::Empty => None,
            DirListing::Files(files) => previous
                .and_then(|p| files.iter().position(|f| *f == p))
                .or(Some(0)),
        };
        self.listing = listing;
        debug!(files = self.files().len(), selected = ?self.selected_file(), "refreshed file list");
        Ok(&self.listing)
    }

    /// Select a file by name. Returns false if it is not in the listing.
    pub fn select_file(&mut self, name: &str) -> bool {
        match self.files().iter().position(|f| f == name) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        let n = self.files().len();
        if n > 0 {
            self.selected = Some(self.selected.map_or(0, |i| (i + 1) % n));
        }
    }

    pub fn select_prev(&mut self) {
        let n = self.files().len();
        if n > 0 {
            self.selected = Some(self.selected.map_or(0, |i| (i + n - 1) % n));
        }
    }

    /// Table for the selected file, loading it if the selection changed.
    pub fn table(&mut self) -> Result<&BarTable, ExtractError> {
        let file_name = self
            .selected_file()
            .ok_or(ExtractError::NoFileSelected)?
            .to_string();

        let stale = self
            .loaded
            .as_ref()
            .map_or(true, |l| l.file_name != file_name);
        if stale {
            let table = load_table(&self.data_dir.join(&file_name))?;
            self.loaded = Some(LoadedTable { file_name, table });
        }

        match &self.loaded {
            Some(l) => Ok(&l.table),
            None => Err(ExtractError::NoFileSelected),
        }
    }

    /// Run one extraction with the session's reproducible RNG.
    pub fn extract(&mut self) -> Result<&Extraction, ExtractError> {
        self.replay(self.extractions)
    }

    /// Run extraction `iteration` of the master seed for the selected
    /// file. Same seed, file and iteration always give the same window.
    pub fn replay(&mut self, iteration: u64) -> Result<&Extraction, ExtractError> {
        let file_name = self
            .selected_file()
            .ok_or(ExtractError::NoFileSelected)?
            .to_string();
        let mut rng = self.seeds.rng_for(&file_name, iteration);
        self.run(&mut rng, Some(iteration))
    }

    /// Run one extraction with a caller-supplied RNG. The result carries
    /// no iteration and the seeded counter does not move.
    pub fn extract_with<R: Rng>(&mut self, rng: &mut R) -> Result<&Extraction, ExtractError> {
        self.run(rng, None)
    }

    fn run<R: Rng>(
        &mut self,
        rng: &mut R,
        iteration: Option<u64>,
    ) -> Result<&Extraction, ExtractError> {
        let size = self.size;
        let target = self.target;

        let table = self.table()?;
        let (sample, outcome) = extract_from_table(table, &size, target, rng)?;
        let rows_text = render_rows(table, &sample.window);

        let file_name = self.selected_file().unwrap_or_default().to_string();
        info!(
            file = %file_name,
            iteration = ?iteration,
            start = sample.window.start,
            count = sample.window.count,
            "extracted window"
        );

        if let Some(i) = iteration {
            self.extractions = self.extractions.max(i + 1);
        }
        let extraction = Extraction {
            file_name,
            iteration,
            sample,
            outcome,
            rows_text,
            prediction_text: prediction_text(&outcome),
            drawn_count_text: size
                .is_random()
                .then(|| drawn_count_text(sample.drawn_count, sample.window.count)),
        };
        Ok(self.last.insert(extraction))
    }
}
