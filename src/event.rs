use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::{App, AppEvent};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Waits up to `timeout` for a key press.
pub fn poll(timeout: Duration) -> Result<Option<AppEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(AppEvent::KeyPress(key.code)));
            }
        }
    }
    Ok(None)
}

/// Runs the main event loop. Ticks are emitted at a fixed rate regardless of
/// how many keys arrive in between.
pub fn run(app: &mut App, terminal: &mut crate::tui::Terminal) -> Result<()> {
    let mut last_tick = Instant::now();

    while app.running {
        terminal.draw(|frame| crate::ui::draw(frame, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if let Some(event) = poll(timeout)? {
            app.update(event);
        }
        if last_tick.elapsed() >= TICK_RATE {
            app.update(AppEvent::Tick);
            last_tick = Instant::now();
        }
    }
    Ok(())
}
