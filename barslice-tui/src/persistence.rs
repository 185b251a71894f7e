//! App state persistence: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use barslice_core::PredictionTarget;

use crate::app::{AppState, CountMode, Overlay};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub last_file: Option<String>,
    pub random_mode: bool,
    pub fixed_count: usize,
    pub random_min: usize,
    pub random_max: usize,
    pub target: PredictionTarget,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            last_file: None,
            random_mode: false,
            fixed_count: 100,
            random_min: 50,
            random_max: 150,
            target: PredictionTarget::NextBar,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns `None` if the file is missing
/// or corrupt, so the config file's values apply unchanged.
pub fn load(path: &Path) -> Option<PersistedState> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        last_file: app.session.selected_file().map(str::to_string),
        random_mode: app.counts.mode == CountMode::Random,
        fixed_count: app.counts.fixed,
        random_min: app.counts.min,
        random_max: app.counts.max,
        target: app.target(),
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState. Call after the first file refresh
/// so the last file can be re-selected.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.counts.mode = if state.random_mode {
        CountMode::Random
    } else {
        CountMode::Fixed
    };
    app.counts.fixed = state.fixed_count.clamp(1, barslice_core::MAX_SAMPLE_COUNT);
    app.counts.min = state.random_min.clamp(1, barslice_core::MAX_SAMPLE_COUNT);
    app.counts.max = state.random_max.clamp(1, barslice_core::MAX_SAMPLE_COUNT);
    app.session.target = state.target;
    app.sync_sample_size();

    if let Some(name) = &state.last_file {
        app.session.select_file(name);
    }
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}
