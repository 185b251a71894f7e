//! TOML settings file.
//!
//! Every key is optional. Missing keys fall back to 100 fixed rows,
//! 50..=150 random rows and the `data_storage` directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{PredictionTarget, SampleSize, MAX_SAMPLE_COUNT};

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "barslice.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("config value {field} = {value} is outside 1..={max}")]
    OutOfRange {
        field: &'static str,
        value: usize,
        max: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory scanned for `.csv` files.
    pub data_dir: PathBuf,
    pub fixed_count: usize,
    pub random_min: usize,
    pub random_max: usize,
    /// Start in random-count mode instead of fixed.
    pub random_mode: bool,
    pub target: PredictionTarget,
    /// Master seed; `None` draws one from OS entropy at startup.
    pub seed: Option<u64>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data_storage"),
            fixed_count: 100,
            random_min: 50,
            random_max: 150,
            random_mode: false,
            target: PredictionTarget::NextBar,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("fixed_count", self.fixed_count),
            ("random_min", self.random_min),
            ("random_max", self.random_max),
        ] {
            if !(1..=MAX_SAMPLE_COUNT).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    max: MAX_SAMPLE_COUNT,
                });
            }
        }
        Ok(())
    }

    /// Initial sample size for the configured mode.
    pub fn sample_size(&self) -> SampleSize {
        if self.random_mode {
            SampleSize::Range {
                min: self.random_min,
                max: self.random_max,
            }
        } else {
            SampleSize::Fixed {
                count: self.fixed_count,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Settings, ConfigError> {
        Settings::from_toml_str(s, Path::new("barslice.toml"))
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(parse("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let s = parse(
            r#"
            data_dir = "bars"
            random_mode = true
            random_min = 5
            target = "next_noon"
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(s.data_dir, PathBuf::from("bars"));
        assert_eq!(s.fixed_count, 100);
        assert_eq!(s.target, PredictionTarget::NextNoon);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.sample_size(), SampleSize::Range { min: 5, max: 150 });
    }

    #[test]
    fn out_of_range_count_is_rejected() {
        let err = parse("fixed_count = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "fixed_count",
                ..
            }
        ));
        assert!(parse("random_max = 1001").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            parse("fixd_count = 3").unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings::load_or_default(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "fixed_count = 12\n").unwrap();
        assert_eq!(Settings::load(&path).unwrap().fixed_count, 12);
    }
}
