//! Prediction panel: the looked-up close, drawn count and replay info.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    match app.session.last_extraction() {
        Some(e) => {
            let found = e.outcome.close().is_some();
            lines.push(Line::from(Span::styled(
                e.prediction_text.as_str(),
                theme::lookup(found),
            )));
            if let Some(drawn) = &e.drawn_count_text {
                lines.push(Line::from(Span::styled(drawn.as_str(), theme::neutral())));
            }
            lines.push(Line::from(Span::styled(
                format!(
                    "rows {}..{} of {}",
                    e.sample.window.start,
                    e.sample.window.end(),
                    e.file_name
                ),
                theme::muted(),
            )));
            let seed = app.session.seeds().master_seed();
            let replay = match e.iteration {
                Some(i) => format!("seed {seed} / iteration {i}"),
                None => format!("seed {seed}"),
            };
            lines.push(Line::from(Span::styled(replay, theme::muted())));
        }
        None => {
            lines.push(Line::from(Span::styled(
                format!("Target: {}", app.target().label()),
                theme::muted(),
            )));
            lines.push(Line::from(Span::styled(
                format!("seed {}", app.session.seeds().master_seed()),
                theme::muted(),
            )));
        }
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}
