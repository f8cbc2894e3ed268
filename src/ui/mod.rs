mod calendar;
mod event_types;
mod events;
mod help;
mod helpers;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{
    App, AppView, ConfirmPopup, EditEventField, EditEventPopup, FocusMode, NewEventField,
    NewEventPopup, NewTypePopup, TABS, TypeColorPopup,
};
use helpers::hex_to_color;
use theme::Theme;

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (title, body_text) = match app.view {
        AppView::Calendar => (" Life Calendar ", calendar::build_calendar_text(app)),
        AppView::Events => (" Events ", events::build_events_text(app)),
        AppView::Types => (" Event Types ", event_types::build_event_types_text(app)),
        AppView::Help => (" Help ", help::build_help_text()),
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let header_lines = vec![Line::from(vec![
        Span::styled(
            "  Lifeweeks  ",
            Style::default().fg(Color::Black).bg(Theme::primary()),
        ),
        Span::raw(" "),
        Span::styled(
            "your life in weeks",
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "   born {}  today {}",
                app.profile.date_of_birth.format("%Y-%m-%d"),
                app.today.format("%Y-%m-%d")
            ),
            Style::default().fg(Theme::dim()),
        ),
    ])];
    let header = Paragraph::new(Text::from(header_lines))
        .alignment(Alignment::Left)
        .block(rounded_block());
    frame.render_widget(header, layout[0]);

    let mut body_lines = vec![
        tabs_line(app),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    body_lines.extend(keybinds_lines(app));
    body_lines.push(Line::from(Span::styled(
        "----------------------------------------",
        Style::default().fg(Theme::dim()),
    )));
    body_lines.extend(body_text.lines);
    let body = Paragraph::new(Text::from(body_lines))
        .style(Style::default().fg(Theme::text()))
        .alignment(Alignment::Left)
        .block(rounded_block());
    frame.render_widget(body, layout[1]);

    let footer = Paragraph::new(Text::from(Line::from(Span::styled(
        format!("  {}", app.quote),
        Style::default()
            .fg(Theme::text())
            .add_modifier(Modifier::ITALIC),
    ))))
    .alignment(Alignment::Left)
    .block(rounded_block());
    frame.render_widget(footer, layout[2]);

    if let Some(popup) = &app.new_event_popup {
        render_new_event_popup(frame, popup);
    }
    if let Some(popup) = &app.edit_event_popup {
        render_edit_event_popup(frame, popup, app);
    }
    if let Some(popup) = &app.new_type_popup {
        render_new_type_popup(frame, popup);
    }
    if let Some(popup) = &app.type_color_popup {
        render_type_color_popup(frame, popup);
    }
    if let Some(popup) = &app.confirm_popup {
        render_confirm_popup(frame, popup);
    }
}

fn rounded_block<'a>() -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Theme::secondary()))
}

fn field_styles(active: bool) -> (Style, Style) {
    if active {
        let style = Style::default()
            .fg(Theme::highlight())
            .add_modifier(Modifier::BOLD);
        (style, style)
    } else {
        (
            Style::default().fg(Theme::dim()),
            Style::default().fg(Theme::text()),
        )
    }
}

fn arrow(active: bool) -> Span<'static> {
    Span::styled(
        if active { "> " } else { "  " },
        Style::default()
            .fg(Theme::selection_marker())
            .add_modifier(Modifier::BOLD),
    )
}

fn popup_title(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    ))
}

fn popup_hint(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Theme::dim())))
}

fn render_popup(frame: &mut Frame, lines: Vec<Line<'_>>, title: &str, width: u16, height: u16) {
    let area = centered_rect(width, height, frame.area());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .block(rounded_block().title(title));
    frame.render_widget(popup, area);
}

fn render_new_event_popup(frame: &mut Frame, popup: &NewEventPopup) {
    let (date_title, date_value) = field_styles(popup.field == NewEventField::Date);
    let (title_title, title_value) = field_styles(popup.field == NewEventField::Title);
    let type_active = popup.field == NewEventField::Type;
    let (type_title, _) = field_styles(type_active);

    let mut lines = vec![
        popup_title("New event"),
        Line::from(""),
        Line::from(vec![
            arrow(popup.field == NewEventField::Date),
            Span::styled("Date (YYYY-MM-DD): ", date_title),
            Span::styled(popup.date.as_str(), date_value),
        ]),
        Line::from(vec![
            arrow(popup.field == NewEventField::Title),
            Span::styled("Title: ", title_title),
            Span::styled(popup.title.as_str(), title_value),
        ]),
        Line::from(""),
        Line::from(vec![arrow(type_active), Span::styled("Type", type_title)]),
    ];
    for (index, name) in popup.types.iter().enumerate() {
        let selected = index == popup.type_index;
        let style = if selected {
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            arrow(selected),
            Span::styled(name.as_str(), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(popup_hint(
        "Tab: switch field. Up/Down: type. Enter: save. Esc: cancel.",
    ));
    render_popup(frame, lines, " New Event ", 60, 60);
}

fn render_edit_event_popup(frame: &mut Frame, popup: &EditEventPopup, app: &App) {
    let (title_title, title_value) = field_styles(popup.field == EditEventField::Title);
    let (age_title, age_value) = field_styles(popup.field == EditEventField::Age);
    let lines = vec![
        popup_title("Edit event"),
        Line::from(""),
        Line::from(vec![
            arrow(popup.field == EditEventField::Title),
            Span::styled("Title: ", title_title),
            Span::styled(popup.title.as_str(), title_value),
        ]),
        Line::from(vec![
            arrow(popup.field == EditEventField::Age),
            Span::styled(
                format!("Age (0-{}): ", app.profile.lifespan_years),
                age_title,
            ),
            Span::styled(popup.age.as_str(), age_value),
        ]),
        Line::from(""),
        popup_hint("A new age moves the event to week age x 52."),
        popup_hint("Tab: switch field. Enter: save. Esc: cancel."),
    ];
    render_popup(frame, lines, " Edit Event ", 60, 40);
}

fn render_new_type_popup(frame: &mut Frame, popup: &NewTypePopup) {
    let (_, value) = field_styles(true);
    let lines = vec![
        popup_title("New event type"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(Theme::dim())),
            Span::styled(popup.name.as_str(), value),
        ]),
        Line::from(""),
        popup_hint("New types start out plum (#dda0dd)."),
        popup_hint("Enter: save. Esc: cancel."),
    ];
    render_popup(frame, lines, " New Type ", 50, 35);
}

fn render_type_color_popup(frame: &mut Frame, popup: &TypeColorPopup) {
    let (_, value) = field_styles(true);
    let color_display = if popup.color.is_empty() {
        "#RRGGBB"
    } else {
        popup.color.as_str()
    };
    let mut color_line = vec![
        Span::styled("Color: ", Style::default().fg(Theme::dim())),
        Span::styled(color_display, value),
    ];
    if let Some(preview) = hex_to_color(&popup.color) {
        color_line.push(Span::raw("  "));
        color_line.push(Span::styled("███", Style::default().fg(preview)));
    }
    let lines = vec![
        popup_title(&popup.type_name),
        Line::from(""),
        Line::from(color_line),
        Line::from(""),
        popup_hint("Type a hex color. Enter: save. Esc: cancel."),
    ];
    render_popup(frame, lines, " Color ", 50, 35);
}

fn render_confirm_popup(frame: &mut Frame, popup: &ConfirmPopup) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        popup_title("Confirm Action"),
        Line::from(""),
        Line::from(Span::styled(
            popup.message.as_str(),
            Style::default().fg(Theme::text()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Theme::dim())),
            Span::styled(
                "Y",
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to confirm or ", Style::default().fg(Theme::dim())),
            Span::styled(
                "N",
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("/", Style::default().fg(Theme::dim())),
            Span::styled(
                "ESC",
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to cancel", Style::default().fg(Theme::dim())),
        ]),
    ];

    let popup_widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(rounded_block().title(" Confirm "));
    frame.render_widget(popup_widget, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn tabs_line(app: &App) -> Line<'_> {
    let names = ["Calendar", "Events", "Types"];

    let mut spans = Vec::new();
    for (index, (name, view)) in names.iter().zip(TABS.iter()).enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let active = *view == app.view;
        let focused = app.focus_mode == FocusMode::TabBar && app.selected_tab_index == index;
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else if focused {
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Theme::dim())
        };
        spans.push(Span::styled(format!(" {name} "), style));
    }

    Line::from(spans)
}

fn keybinds_lines(app: &App) -> Vec<Line<'static>> {
    let focus_hint = if app.focus_mode == FocusMode::TabBar {
        "Tab: Switch to content  ←/→: Navigate tabs  Enter: Select"
    } else {
        "Tab: Switch to tab bar  h/v/t: Quick nav  ?: Help  q: Quit"
    };

    let primary = match app.view {
        AppView::Calendar => "Up/Down: Scroll  +/-: Lifespan  ]/[: Preview  n: New event  r: Refresh",
        AppView::Events => "Up/Down: Select  /: Search  n: New  e: Edit  d: Delete",
        AppView::Types => "Up/Down: Select  n: New  c: Color  d: Delete",
        AppView::Help => "Press ? or ESC to close this help screen",
    };
    vec![
        Line::from(Span::styled(
            focus_hint,
            Style::default().fg(Theme::highlight()),
        )),
        Line::from(Span::styled(primary, Style::default().fg(Theme::dim()))),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::db;
    use crate::types::Profile;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn app() -> App {
        let conn = db::init_in_memory().unwrap();
        let store = db::load_store(&conn).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        App::new(conn, store, Profile::default(), today)
    }

    #[test]
    fn calendar_shows_summary_and_year_rows() {
        let app = app();
        let screen = render(&app);
        assert!(screen.contains("Weeks lived"));
        assert!(screen.contains("Life Calendar"));
        assert!(screen.contains("Birthday"));
        assert!(screen.contains("◆"));
    }

    #[test]
    fn events_view_lists_events() {
        let mut app = app();
        let dob = app.profile.date_of_birth;
        app.store
            .add_event(dob, NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(), "Moved", "Ghost");
        app.view = AppView::Events;
        let screen = render(&app);
        assert!(screen.contains("Moved"));
        assert!(screen.contains("Ghost, removed"));
    }
}
