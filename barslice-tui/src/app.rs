//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. User actions are methods on [`AppState`];
//! every failure is turned into a status message plus an error-history
//! record, never propagated out of the event loop.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use barslice_core::data::{ensure_data_dir, open_in_file_manager};
use barslice_core::{
    DirListing, ExtractError, PredictionTarget, SampleError, SampleSize, Session, Settings,
    MAX_SAMPLE_COUNT,
};

use crate::clipboard::Clipboard;

const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NoFile,
    Data,
    Sample,
    Io,
    Clipboard,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::NoFile => "FILE",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Sample => "ROWS",
            ErrorCategory::Io => "IO",
            ErrorCategory::Clipboard => "CLIP",
        }
    }

    fn of(err: &ExtractError) -> Self {
        match err {
            ExtractError::NoFileSelected => ErrorCategory::NoFile,
            ExtractError::DataFormat(_) => ErrorCategory::Data,
            ExtractError::Sample(_) => ErrorCategory::Sample,
        }
    }
}

/// Count mode shown in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    Fixed,
    Random,
}

/// One focusable row of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    File,
    Mode,
    FixedCount,
    RandomMin,
    RandomMax,
    Target,
}

impl SettingsField {
    pub fn label(self) -> &'static str {
        match self {
            SettingsField::File => "Data file",
            SettingsField::Mode => "Count mode",
            SettingsField::FixedCount => "Rows",
            SettingsField::RandomMin => "Min rows",
            SettingsField::RandomMax => "Max rows",
            SettingsField::Target => "Show close of",
        }
    }
}

/// Count inputs. Both modes keep their values while the other is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountInputs {
    pub mode: CountMode,
    pub fixed: usize,
    pub min: usize,
    pub max: usize,
}

impl CountInputs {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            mode: if settings.random_mode {
                CountMode::Random
            } else {
                CountMode::Fixed
            },
            fixed: settings.fixed_count,
            min: settings.random_min,
            max: settings.random_max,
        }
    }

    pub fn sample_size(&self) -> SampleSize {
        match self.mode {
            CountMode::Fixed => SampleSize::Fixed { count: self.fixed },
            CountMode::Random => SampleSize::Range {
                min: self.min,
                max: self.max,
            },
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub session: Session,
    pub counts: CountInputs,
    pub focus: usize,
    pub rows_scroll: u16,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,

    clipboard: Box<dyn Clipboard>,
}

impl AppState {
    pub fn new(session: Session, settings: &Settings, clipboard: Box<dyn Clipboard>) -> Self {
        let mut app = Self {
            running: true,
            session,
            counts: CountInputs::from_settings(settings),
            focus: 0,
            rows_scroll: 0,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            clipboard,
        };
        app.session.target = settings.target;
        app.sync_sample_size();
        app
    }

    /// Settings rows visible for the current count mode.
    pub fn visible_fields(&self) -> Vec<SettingsField> {
        let mut fields = vec![SettingsField::File, SettingsField::Mode];
        match self.counts.mode {
            CountMode::Fixed => fields.push(SettingsField::FixedCount),
            CountMode::Random => {
                fields.push(SettingsField::RandomMin);
                fields.push(SettingsField::RandomMax);
            }
        }
        fields.push(SettingsField::Target);
        fields
    }

    pub fn focused_field(&self) -> SettingsField {
        let fields = self.visible_fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        if self.focus + 1 < self.visible_fields().len() {
            self.focus += 1;
        }
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    /// Adjust the focused setting by `delta` steps.
    pub fn adjust(&mut self, delta: i64) {
        let step = |v: usize| -> usize {
            (v as i64 + delta).clamp(1, MAX_SAMPLE_COUNT as i64) as usize
        };
        match self.focused_field() {
            SettingsField::File => {
                if delta > 0 {
                    self.session.select_next();
                } else {
                    self.session.select_prev();
                }
            }
            SettingsField::Mode => self.toggle_mode(),
            SettingsField::FixedCount => self.counts.fixed = step(self.counts.fixed),
            SettingsField::RandomMin => self.counts.min = step(self.counts.min),
            SettingsField::RandomMax => self.counts.max = step(self.counts.max),
            SettingsField::Target => self.toggle_target(),
        }
        self.sync_sample_size();
    }

    pub fn toggle_mode(&mut self) {
        self.counts.mode = match self.counts.mode {
            CountMode::Fixed => CountMode::Random,
            CountMode::Random => CountMode::Fixed,
        };
        self.focus = self.focus.min(self.visible_fields().len() - 1);
        self.sync_sample_size();
    }

    pub fn toggle_target(&mut self) {
        self.session.target = self.session.target.toggled();
    }

    pub fn sync_sample_size(&mut self) {
        self.session.size = self.counts.sample_size();
    }

    pub fn target(&self) -> PredictionTarget {
        self.session.target
    }

    /// Make sure the data directory exists, reporting failure.
    pub fn ensure_data_dir(&mut self) {
        if let Err(e) = ensure_data_dir(self.session.data_dir()) {
            self.push_error(ErrorCategory::Io, e.to_string(), "create data directory".into());
        }
    }

    /// Re-scan the data directory for CSV files.
    pub fn refresh_files(&mut self) {
        match self.session.refresh_files() {
            Ok(DirListing::Empty) => {
                let dir = self.session.data_dir().display().to_string();
                self.set_warning(format!("Data folder is empty: {dir}"));
            }
            Ok(DirListing::Files(files)) => {
                let n = files.len();
                self.set_status(format!("{n} data file(s) found"));
            }
            Err(e) => {
                self.push_error(ErrorCategory::Io, e.to_string(), "list data files".into());
            }
        }
    }

    /// Run one extraction for the selected file.
    pub fn extract(&mut self) {
        self.sync_sample_size();
        match self.session.extract() {
            Ok(e) => {
                let mut msg = format!(
                    "Extracted {} rows from {}",
                    e.sample.window.count, e.file_name
                );
                if let Some(i) = e.iteration {
                    msg.push_str(&format!(" (#{i})"));
                }
                if e.sample.was_clamped() {
                    msg.push_str(&format!(", clamped from {}", e.sample.drawn_count));
                }
                self.rows_scroll = 0;
                self.set_status(msg);
            }
            Err(e) => {
                let context = self
                    .session
                    .selected_file()
                    .unwrap_or("extract")
                    .to_string();
                let category = ErrorCategory::of(&e);
                let message = match &e {
                    ExtractError::NoFileSelected => "Select a data file first".to_string(),
                    ExtractError::Sample(SampleError::InsufficientRows { rows }) => {
                        format!("Not enough rows to extract: file has {rows}, need at least 2")
                    }
                    other => other.to_string(),
                };
                self.push_error(category, message, context);
            }
        }
    }

    /// Copy the extracted rows to the clipboard.
    pub fn copy_rows(&mut self) {
        let Some(text) = self.session.copy_text().map(str::to_string) else {
            self.set_warning("Nothing extracted yet");
            return;
        };
        match self.clipboard.set_text(&text) {
            Ok(()) => self.set_status("Copied extracted rows"),
            Err(e) => self.push_error(ErrorCategory::Clipboard, e.to_string(), "copy".into()),
        }
    }

    /// Show the data directory in the OS file manager.
    pub fn open_data_folder(&mut self) {
        match open_in_file_manager(self.session.data_dir()) {
            Ok(()) => self.set_status("Opened data folder"),
            Err(e) => self.push_error(ErrorCategory::Io, e.to_string(), "open data folder".into()),
        }
    }

    pub fn scroll_rows(&mut self, delta: i32) {
        let max = self
            .session
            .last_extraction()
            .map_or(0, |e| e.rows_text.lines().count().saturating_sub(1));
        let next = (self.rows_scroll as i64 + delta as i64).clamp(0, max as i64);
        self.rows_scroll = u16::try_from(next).unwrap_or(u16::MAX);
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        warn!(category = category.label(), %context, "{message}");
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        info!("{msg}");
        self.status_message = Some((msg, StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        warn!("{msg}");
        self.status_message = Some((msg, StatusLevel::Warning));
    }
}
