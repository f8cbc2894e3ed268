use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::hex_to_color;
use super::theme::Theme;
use crate::app::App;

pub fn build_event_types_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            format!("  {status}"),
            Style::default().fg(Theme::highlight()),
        )));
        lines.push(Line::from(""));
    }
    if app.store.event_types().is_empty() {
        lines.push(Line::from("  No event types. Press 'n' to create one."));
        return Text::from(lines);
    }

    for (index, event_type) in app.store.event_types().iter().enumerate() {
        let selected = index == app.selected_type_index;
        let marker_style = if selected {
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        let name_style = hex_to_color(&event_type.color)
            .map(|color| Style::default().fg(color).add_modifier(Modifier::BOLD))
            .unwrap_or_else(|| Style::default().fg(Theme::text()));
        let count = app
            .store
            .events()
            .iter()
            .filter(|e| e.type_name == event_type.name)
            .count();
        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, marker_style),
            Span::styled("███ ", name_style),
            Span::styled(event_type.name.as_str(), name_style),
            Span::raw("  "),
            Span::styled(event_type.color.as_str(), Style::default().fg(Theme::dim())),
            Span::styled(
                format!("  {count} event(s)"),
                Style::default().fg(Theme::accent()),
            ),
        ]));
    }

    Text::from(lines)
}
