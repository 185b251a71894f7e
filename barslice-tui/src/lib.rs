//! barslice TUI: one screen with settings, extracted rows and the next
//! close, plus help and error-history overlays.

pub mod app;
pub mod clipboard;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;

#[cfg(test)]
mod test_helpers;
