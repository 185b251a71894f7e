//! Settings panel: data file, count mode, counts and close target.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, CountMode, SettingsField};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "[j/k]move [h/l]adjust [Enter]extract",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    let focused = app.focused_field();
    for field in app.visible_fields() {
        let is_active = field == focused;
        let style = if is_active {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>14}: ", field.label()), style),
            Span::styled(field_value(app, field), style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   [x] ", theme::accent_bold()),
        Span::styled("Extract rows", theme::text()),
    ]));

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn field_value(app: &AppState, field: SettingsField) -> String {
    match field {
        SettingsField::File => {
            let total = app.session.files().len();
            match (app.session.selected_index(), app.session.selected_file()) {
                (Some(i), Some(name)) => format!("< {name} > ({}/{total})", i + 1),
                _ => "(folder is empty)".to_string(),
            }
        }
        SettingsField::Mode => match app.counts.mode {
            CountMode::Fixed => "fixed".to_string(),
            CountMode::Random => "random range".to_string(),
        },
        SettingsField::FixedCount => app.counts.fixed.to_string(),
        SettingsField::RandomMin => app.counts.min.to_string(),
        SettingsField::RandomMax => app.counts.max.to_string(),
        SettingsField::Target => app.target().label().to_string(),
    }
}
