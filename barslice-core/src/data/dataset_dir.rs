//! The fixed local data directory: creation, CSV listing, file-manager open.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DirError {
    #[error("failed to create data directory {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to list data directory {path}: {source}")]
    List {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open data directory {path}: {reason}")]
    Open { path: PathBuf, reason: String },
}

/// Result of listing the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirListing {
    /// No `.csv` files present. A reportable state, not an error.
    Empty,
    /// File names (not paths), sorted.
    Files(Vec<String>),
}

impl DirListing {
    pub fn files(&self) -> &[String] {
        match self {
            DirListing::Empty => &[],
            DirListing::Files(f) => f,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DirListing::Empty)
    }
}

/// Create the data directory if it does not exist yet.
pub fn ensure_data_dir(dir: &Path) -> Result<(), DirError> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|source| DirError::Create {
        path: dir.to_path_buf(),
        source,
    })?;
    info!(path = %dir.display(), "created data directory");
    Ok(())
}

/// List the `.csv` files directly inside `dir`.
pub fn list_csv_files(dir: &Path) -> Result<DirListing, DirError> {
    let list_err = |source| DirError::List {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("csv") {
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    debug!(path = %dir.display(), count = files.len(), "listed csv files");

    if files.is_empty() {
        Ok(DirListing::Empty)
    } else {
        Ok(DirListing::Files(files))
    }
}

/// Ask the host OS to show `dir` in its file manager.
pub fn open_in_file_manager(dir: &Path) -> Result<(), DirError> {
    if !dir.is_dir() {
        return Err(DirError::Open {
            path: dir.to_path_buf(),
            reason: "not a directory".into(),
        });
    }
    let path = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| DirError::Open {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?
            .join(dir)
    };

    launch(file_manager_program(), &path)?;
    info!(path = %path.display(), "opened data directory");
    Ok(())
}

fn file_manager_program() -> &'static str {
    if cfg!(windows) {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Run `program path` detached from our stdio. The TUI owns the terminal
/// in raw mode, so launcher chatter must not reach it.
fn launch(program: &str, path: &Path) -> Result<(), DirError> {
    let status = Command::new(program)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| DirError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    // explorer.exe exits with 1 even when the window opened.
    if !status.success() && !cfg!(windows) {
        return Err(DirError::Open {
            path: path.to_path_buf(),
            reason: format!("{program} exited with {status}"),
        });
    }
    Ok(())
}
