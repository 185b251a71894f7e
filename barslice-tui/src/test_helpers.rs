//! Test helpers: temp data directories and a recording clipboard.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use barslice_core::{ExtractionSeeds, Session, Settings};

use crate::app::AppState;
use crate::clipboard::{Clipboard, ClipboardError};

#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub copied: Rc<RefCell<Option<String>>>,
}

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self.copied.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Write `rows` hourly bars starting 2024-01-01 00:00.
pub fn write_hourly_csv(dir: &Path, name: &str, rows: usize) {
    let mut content = String::from("timestamp,close\n");
    for i in 0..rows {
        content.push_str(&format!(
            "2024-01-{:02} {:02}:00:00,{}\n",
            1 + i / 24,
            i % 24,
            100 + i
        ));
    }
    std::fs::write(dir.join(name), content).unwrap();
}

pub fn app_with_clipboard(dir: &Path, clipboard: Box<dyn Clipboard>) -> AppState {
    let settings = Settings {
        data_dir: dir.to_path_buf(),
        ..Settings::default()
    };
    let session = Session::new(dir, ExtractionSeeds::new(7));
    AppState::new(session, &settings, clipboard)
}

pub fn app_in(dir: &Path) -> AppState {
    app_with_clipboard(dir, Box::new(RecordingClipboard::default()))
}
