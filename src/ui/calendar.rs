use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::hex_to_color;
use super::theme::Theme;
use crate::app::App;
use crate::clock::WEEKS_PER_YEAR;
use crate::color::{FUTURE_COLOR, LIVED_COLOR};
use crate::types::GridCell;

const WEEK_CELL: &str = "■";
const EVENT_CELL: &str = "●";
const TODAY_CELL: &str = "◆";

pub fn build_calendar_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    lines.push(summary_line(app));
    lines.push(Line::from(""));
    lines.push(legend_line(app));
    lines.push(Line::from(""));

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            format!("  {status}"),
            Style::default().fg(Theme::highlight()),
        )));
        lines.push(Line::from(""));
    }

    let snapshot = &app.snapshot;
    if snapshot.display_years <= 0 {
        lines.push(Line::from(Span::styled(
            "  Nothing to show yet: the date of birth is in the future.",
            Style::default().fg(Theme::dim()),
        )));
        return Text::from(lines);
    }

    lines.push(Line::from(Span::styled(
        format!("        {}", week_ruler()),
        Style::default().fg(Theme::dim()),
    )));

    let grid = app.store.grid(snapshot);
    for (year, row) in grid
        .chunks(WEEKS_PER_YEAR as usize)
        .enumerate()
        .skip(app.grid_scroll)
    {
        let passed = (year as i64) < i64::from(snapshot.current_age_years);
        let mut spans = vec![Span::styled(
            format!("  {} {year:>3} ", if passed { "✓" } else { "·" }),
            Style::default().fg(if passed { Theme::dim() } else { Theme::text() }),
        )];
        spans.extend(row_spans(row, snapshot.weeks_lived));
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}

fn summary_line(app: &App) -> Line<'_> {
    let snapshot = &app.snapshot;
    let outlived = snapshot.weeks_left < 0;
    let value_style = Style::default()
        .fg(if outlived { Theme::warn() } else { Theme::accent() })
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Theme::dim());
    Line::from(vec![
        Span::styled("  Weeks lived ", label_style),
        Span::styled(snapshot.weeks_lived.to_string(), value_style),
        Span::styled("   Weeks left ", label_style),
        Span::styled(snapshot.weeks_left.to_string(), value_style),
        Span::styled("   Life completed ", label_style),
        Span::styled(snapshot.format_percent(), value_style),
        Span::styled("   Age ", label_style),
        Span::styled(snapshot.current_age_years.to_string(), value_style),
        Span::styled(
            format!(
                "   ({} years, +{} preview)",
                app.profile.lifespan_years, app.profile.buffer_years
            ),
            label_style,
        ),
    ])
}

fn legend_line(app: &App) -> Line<'_> {
    let mut spans = vec![Span::raw("  ")];
    spans.extend(swatch("Lived", LIVED_COLOR));
    spans.extend(swatch("Future", FUTURE_COLOR));
    spans.push(Span::styled(
        format!("{TODAY_CELL} Today  "),
        Style::default().fg(Theme::today()),
    ));
    for event_type in app.store.event_types() {
        spans.extend(swatch(&event_type.name, &event_type.color));
    }
    Line::from(spans)
}

fn swatch<'a>(name: &'a str, color: &str) -> [Span<'a>; 2] {
    let style = hex_to_color(color)
        .map(|c| Style::default().fg(c))
        .unwrap_or_else(|| Style::default().fg(Theme::text()));
    [
        Span::styled(format!("{WEEK_CELL} "), style),
        Span::styled(format!("{name}  "), Style::default().fg(Theme::text())),
    ]
}

/// Merges runs of identically drawn cells into one span.
fn row_spans(row: &[GridCell<'_>], weeks_lived: i64) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    for cell in row {
        let (symbol, style) = if cell.week == weeks_lived && cell.event_id.is_none() {
            (
                TODAY_CELL,
                Style::default()
                    .fg(Theme::today())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            let symbol = if cell.event_id.is_some() {
                EVENT_CELL
            } else {
                WEEK_CELL
            };
            let style = hex_to_color(cell.color)
                .map(|c| Style::default().fg(c))
                .unwrap_or_else(|| Style::default().fg(Theme::dim()));
            (symbol, style)
        };
        if run_style != Some(style) && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
        }
        run_style = Some(style);
        run.push_str(symbol);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style.unwrap_or_default()));
    }
    spans
}

fn week_ruler() -> String {
    (0..WEEKS_PER_YEAR)
        .map(|week| if week % 13 == 0 { '|' } else { ' ' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(week: i64, color: &str, event: bool) -> GridCell<'_> {
        GridCell {
            week,
            color,
            label: "",
            event_id: if event { Some(1) } else { None },
        }
    }

    #[test]
    fn merges_runs_of_equal_cells() {
        let row = vec![
            cell(0, LIVED_COLOR, false),
            cell(1, LIVED_COLOR, false),
            cell(2, "#4da6ff", true),
            cell(3, FUTURE_COLOR, false),
            cell(4, FUTURE_COLOR, false),
        ];
        let spans = row_spans(&row, 3);
        let contents: Vec<_> = spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(contents, ["■■", "●", "◆", "■"]);
    }

    #[test]
    fn ruler_marks_quarters() {
        let ruler = week_ruler();
        assert_eq!(ruler.chars().count(), 52);
        assert_eq!(ruler.matches('|').count(), 4);
    }
}
