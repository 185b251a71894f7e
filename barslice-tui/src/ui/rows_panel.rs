//! Extracted rows as plain aligned text, scrollable with PgUp/PgDn.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(extraction) = app.session.last_extraction() else {
        let text = Paragraph::new(Span::styled(
            "No rows yet. Pick a file and press x to extract.",
            theme::muted(),
        ));
        f.render_widget(text, area);
        return;
    };

    let lines: Vec<Line> = extraction
        .rows_text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == 0 {
                theme::accent_bold()
            } else {
                theme::text()
            };
            Line::from(Span::styled(line, style))
        })
        .collect();

    let para = Paragraph::new(lines).scroll((app.rows_scroll, 0));
    f.render_widget(para, area);
}
