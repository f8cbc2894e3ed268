use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hex_to_color};
use super::theme::Theme;
use crate::app::App;
use crate::color::LEGEND_FALLBACK_COLOR;

pub fn build_events_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    if app.events_search_active || !app.events_search_query.is_empty() {
        let cursor = if app.events_search_active { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled("  Search: ", Style::default().fg(Theme::dim())),
            Span::styled(
                format!("{}{cursor}", app.events_search_query),
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
    }
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            format!("  {status}"),
            Style::default().fg(Theme::highlight()),
        )));
        lines.push(Line::from(""));
    }

    let events = app.visible_events();
    if app.store.events().is_empty() {
        lines.push(Line::from("  No events yet. Press 'n' to add one."));
        return Text::from(lines);
    }
    if events.is_empty() {
        lines.push(Line::from("  No events match the search."));
        return Text::from(lines);
    }

    for (index, event) in events.into_iter().enumerate() {
        let selected = index == app.selected_event_index;
        let marker_style = if selected {
            Style::default()
                .fg(Theme::selection_marker())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        let type_color = app.store.type_color(&event.type_name);
        let dot_color = hex_to_color(type_color.unwrap_or(LEGEND_FALLBACK_COLOR))
            .unwrap_or(Theme::dim());
        let title_style = if selected {
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::text())
        };
        let type_label = if type_color.is_some() {
            format!("({})", event.type_name)
        } else {
            format!("({}, removed)", event.type_name)
        };

        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, marker_style),
            Span::styled("● ", Style::default().fg(dot_color)),
            Span::styled(clamp_name(&event.title, 28), title_style),
            Span::raw(" "),
            Span::styled(clamp_name(&type_label, 24), Style::default().fg(Theme::dim())),
            Span::styled(
                format!(" on {}", event.date.format("%Y-%m-%d")),
                Style::default().fg(Theme::secondary()),
            ),
            Span::styled(
                format!("  Week {:>4}  Age {:>3}", event.week, event.age_years()),
                Style::default().fg(Theme::accent()),
            ),
        ]));
    }

    Text::from(lines)
}
