//! Keyboard input dispatch: overlays first, then the single main screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay};

const ROWS_PAGE: i32 = 10;

/// Handle one key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')
            ) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Main screen.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }

        KeyCode::Char('j') | KeyCode::Down => app.focus_next(),
        KeyCode::Char('k') | KeyCode::Up => app.focus_prev(),
        KeyCode::Char('l') | KeyCode::Right => app.adjust(1),
        KeyCode::Char('h') | KeyCode::Left => app.adjust(-1),
        KeyCode::Char('L') => app.adjust(10),
        KeyCode::Char('H') => app.adjust(-10),

        KeyCode::Char('m') => app.toggle_mode(),
        KeyCode::Char('n') => app.toggle_target(),

        KeyCode::Enter | KeyCode::Char('x') => app.extract(),
        KeyCode::Char('c') => app.copy_rows(),
        KeyCode::Char('r') => app.refresh_files(),
        KeyCode::Char('o') => app.open_data_folder(),

        KeyCode::PageDown => app.scroll_rows(ROWS_PAGE),
        KeyCode::PageUp => app.scroll_rows(-ROWS_PAGE),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
