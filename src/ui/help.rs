use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text() -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Key bindings",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title("Global"));
    lines.extend(section_lines(&[
        "q: Quit",
        "?: Toggle help",
        "Tab: Toggle focus (tab bar / content)",
        "Left/Right: Navigate tabs (tab bar focus)",
        "Enter: Activate tab (tab bar focus)",
        "h/v/t: Calendar, Events, Types",
        "r: New quote and refresh today",
        "esc: Back",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Calendar"));
    lines.extend(section_lines(&[
        "Up/Down: Scroll year rows",
        "+/-: Target lifespan (50-100 years)",
        "]/[: Future preview (0-10 years)",
        "n: New event",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Events"));
    lines.extend(section_lines(&[
        "Up/Down: Move selection",
        "/: Search by title",
        "n: New event",
        "e: Edit title and age",
        "d: Delete event",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Types"));
    lines.extend(section_lines(&[
        "Up/Down: Move selection",
        "n: New type",
        "c: Change color (#RRGGBB)",
        "d: Delete type (events keep the name)",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Popups"));
    lines.extend(section_lines(&[
        "New event: Tab switch field, Up/Down pick type, Enter save, Esc cancel",
        "Edit event: Tab switch field, Enter save, Esc cancel",
        "Changing the age moves the event to week age x 52; the date is kept",
    ]));

    Text::from(lines)
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    ))
}

fn section_lines(items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(Span::styled(
                format!("  - {item}"),
                Style::default().fg(Theme::text()),
            ))
        })
        .collect()
}
