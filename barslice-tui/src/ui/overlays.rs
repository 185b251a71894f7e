//! Overlay widgets: welcome, help, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(60, 45, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to barslice ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "  1. Put OHLC .csv files in {}",
                app.session.data_dir().display()
            ),
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Press r to rescan, h/l on Data file to pick one",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Set a fixed count or a random range (m)",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  4. Press x to extract, n to switch to the 12:00 close",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Keyboard shortcuts.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Settings");
    key(&mut lines, "j / k", "Move between settings");
    key(&mut lines, "h / l", "Adjust by 1 (or pick previous / next file)");
    key(&mut lines, "H / L", "Adjust by 10");
    key(&mut lines, "m", "Toggle fixed / random count");
    key(&mut lines, "n", "Toggle next bar / next 12:00 bar");
    lines.push(Line::from(""));

    section(&mut lines, "Actions");
    key(&mut lines, "Enter / x", "Extract a random window");
    key(&mut lines, "c", "Copy extracted rows to the clipboard");
    key(&mut lines, "r", "Rescan the data folder");
    key(&mut lines, "o", "Open the data folder");
    key(&mut lines, "PgUp / PgDn", "Scroll extracted rows");
    lines.push(Line::from(""));

    section(&mut lines, "General");
    key(&mut lines, "e", "Open error history");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q", "Quit");

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, popup);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        theme::accent_bold(),
    )));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>12}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().skip(app.error_scroll) {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }

        if lines.len() >= inner.height as usize {
            break;
        }
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, inner);
}
