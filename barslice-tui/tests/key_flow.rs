//! Drives the TUI state through key presses against a real data folder.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use barslice_core::{ExtractionSeeds, PredictionTarget, Session, Settings};
use barslice_tui::app::{AppState, ErrorCategory, StatusLevel};
use barslice_tui::clipboard::{Clipboard, ClipboardError};
use barslice_tui::handle_key;

#[derive(Default)]
struct SharedClipboard(Rc<RefCell<Vec<String>>>);

impl Clipboard for SharedClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.0.borrow_mut().push(text.to_string());
        Ok(())
    }
}

struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Failed {
            program: "xclip".into(),
            reason: "no display".into(),
        })
    }
}

fn write_csv(dir: &Path, name: &str, lines: &[&str]) {
    let mut content = String::from("timestamp,open,close\n");
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    std::fs::write(dir.join(name), content).unwrap();
}

fn app(dir: &Path, clipboard: Box<dyn Clipboard>) -> AppState {
    let settings = Settings {
        data_dir: dir.to_path_buf(),
        fixed_count: 2,
        ..Settings::default()
    };
    let session = Session::new(dir, ExtractionSeeds::new(2024));
    let mut app = AppState::new(session, &settings, clipboard);
    app.refresh_files();
    app
}

fn press(app: &mut AppState, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

#[test]
fn noon_lookup_through_keys() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        dir.path(),
        "eth.csv",
        &[
            "2024-05-01 09:00:00,1,10.0",
            "2024-05-01 10:00:00,1,11.0",
            "2024-05-01 11:00:00,1,12.0",
            "2024-05-01 12:00:00,1,13.0",
        ],
    );
    let mut app = app(dir.path(), Box::new(SharedClipboard::default()));

    // 4 rows and a count of 3 leaves exactly one window: rows 0..3.
    app.counts.fixed = 3;
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.target(), PredictionTarget::NextNoon);
    press(&mut app, KeyCode::Enter);

    let e = app.session.last_extraction().unwrap();
    assert_eq!(e.sample.window.start, 0);
    assert_eq!(e.outcome.close(), Some(13.0));
    assert_eq!(e.prediction_text, "next 12:00 close: 13.00");
}

#[test]
fn copy_sends_rendered_rows() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        dir.path(),
        "btc.csv",
        &[
            "2024-05-01 09:00:00,1,10.0",
            "2024-05-01 10:00:00,1,11.0",
            "2024-05-01 11:00:00,1,12.0",
        ],
    );
    let copied = Rc::new(RefCell::new(Vec::new()));
    let mut app = app(dir.path(), Box::new(SharedClipboard(copied.clone())));

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('c'));

    let copied = copied.borrow();
    assert_eq!(copied.len(), 1);
    let mut lines = copied[0].lines();
    assert!(lines.next().unwrap().contains("timestamp"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn clipboard_failure_is_recorded_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        dir.path(),
        "btc.csv",
        &["2024-05-01 09:00:00,1,10.0", "2024-05-01 10:00:00,1,11.0"],
    );
    let mut app = app(dir.path(), Box::new(BrokenClipboard));

    press(&mut app, KeyCode::Char('x'));
    press(&mut app, KeyCode::Char('c'));

    assert!(app.running);
    assert_eq!(app.error_history[0].category, ErrorCategory::Clipboard);
    assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Error);
}

#[test]
fn bad_close_surfaces_data_error() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        dir.path(),
        "bad.csv",
        &["2024-05-01 09:00:00,1,ten", "2024-05-01 10:00:00,1,11.0"],
    );
    let mut app = app(dir.path(), Box::new(SharedClipboard::default()));

    press(&mut app, KeyCode::Char('x'));

    assert_eq!(app.error_history.len(), 1);
    assert_eq!(app.error_history[0].category, ErrorCategory::Data);
    assert!(app.session.last_extraction().is_none());
}

#[test]
fn file_selection_cycles_with_h_and_l() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.csv", "b.csv", "c.csv"] {
        write_csv(dir.path(), name, &["2024-05-01 09:00:00,1,10.0"]);
    }
    let mut app = app(dir.path(), Box::new(SharedClipboard::default()));

    assert_eq!(app.session.selected_file(), Some("a.csv"));
    press(&mut app, KeyCode::Char('l'));
    assert_eq!(app.session.selected_file(), Some("b.csv"));
    press(&mut app, KeyCode::Char('h'));
    press(&mut app, KeyCode::Char('h'));
    assert_eq!(app.session.selected_file(), Some("c.csv"));
}
