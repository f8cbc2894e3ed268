use chrono::{Local, NaiveDate};
use crossterm::event::KeyCode;
use rusqlite::Connection;
use tracing::{error, info};

use crate::clock::{BUFFER_RANGE, LIFESPAN_RANGE};
use crate::color::normalize_hex;
use crate::config::{DATE_FORMAT, parse_date};
use crate::db;
use crate::quotes;
use crate::store::{AddTypeOutcome, EventStore};
use crate::types::{Event, EventId, LifeSnapshot, Profile};

use super::{AppEvent, AppView, FocusMode, TABS};

/// The top-level application state.
pub struct App {
    pub running: bool,
    pub db: Connection,
    pub store: EventStore,
    pub profile: Profile,
    pub today: NaiveDate,
    pub snapshot: LifeSnapshot,
    pub quote: &'static str,
    pub view: AppView,
    view_history: Vec<AppView>,
    pub status: Option<String>,
    pub focus_mode: FocusMode,
    pub selected_tab_index: usize,
    pub grid_scroll: usize,
    pub selected_event_index: usize,
    pub selected_type_index: usize,
    pub events_search_query: String,
    pub events_search_active: bool,
    pub new_event_popup: Option<NewEventPopup>,
    pub edit_event_popup: Option<EditEventPopup>,
    pub new_type_popup: Option<NewTypePopup>,
    pub type_color_popup: Option<TypeColorPopup>,
    pub confirm_popup: Option<ConfirmPopup>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NewEventField {
    Date,
    Title,
    Type,
}

#[derive(Clone, Debug)]
pub struct NewEventPopup {
    pub date: String,
    pub title: String,
    pub type_index: usize,
    pub types: Vec<String>,
    pub field: NewEventField,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditEventField {
    Title,
    Age,
}

#[derive(Clone, Debug)]
pub struct EditEventPopup {
    pub event_id: EventId,
    pub title: String,
    pub age: String,
    pub field: EditEventField,
}

#[derive(Clone, Debug, Default)]
pub struct NewTypePopup {
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct TypeColorPopup {
    pub type_name: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    DeleteEvent(EventId),
    DeleteType(String),
}

#[derive(Clone, Debug)]
pub struct ConfirmPopup {
    pub message: String,
    pub action: PendingAction,
}

impl NewEventPopup {
    fn select_prev(&mut self) {
        if self.types.is_empty() {
            return;
        }
        if self.type_index == 0 {
            self.type_index = self.types.len() - 1;
        } else {
            self.type_index -= 1;
        }
    }

    fn select_next(&mut self) {
        if self.types.is_empty() {
            return;
        }
        self.type_index = (self.type_index + 1) % self.types.len();
    }

    fn active_text(&mut self) -> Option<&mut String> {
        match self.field {
            NewEventField::Date => Some(&mut self.date),
            NewEventField::Title => Some(&mut self.title),
            NewEventField::Type => None,
        }
    }
}

impl EditEventPopup {
    fn active_text(&mut self) -> &mut String {
        match self.field {
            EditEventField::Title => &mut self.title,
            EditEventField::Age => &mut self.age,
        }
    }
}

impl App {
    pub fn new(db: Connection, store: EventStore, profile: Profile, today: NaiveDate) -> Self {
        Self {
            running: true,
            db,
            store,
            profile,
            today,
            snapshot: profile.snapshot(today),
            quote: quotes::random_quote(),
            view: AppView::Calendar,
            view_history: Vec::new(),
            status: None,
            focus_mode: FocusMode::Content,
            selected_tab_index: 0,
            grid_scroll: 0,
            selected_event_index: 0,
            selected_type_index: 0,
            events_search_query: String::new(),
            events_search_active: false,
            new_event_popup: None,
            edit_event_popup: None,
            new_type_popup: None,
            type_color_popup: None,
            confirm_popup: None,
        }
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => {
                let today = Local::now().date_naive();
                if today != self.today {
                    self.set_today(today);
                }
            }
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        self.refresh_snapshot();
    }

    fn refresh_snapshot(&mut self) {
        self.snapshot = self.profile.snapshot(self.today);
        let rows = self.snapshot.display_years.max(0) as usize;
        self.grid_scroll = self.grid_scroll.min(rows.saturating_sub(1));
    }

    /// Events shown in the Events view, filtered by the search query.
    pub fn visible_events(&self) -> Vec<&Event> {
        self.store.search_events(&self.events_search_query)
    }

    fn selected_event(&self) -> Option<&Event> {
        self.visible_events()
            .get(self.selected_event_index)
            .copied()
    }

    fn selected_type_name(&self) -> Option<String> {
        self.store
            .event_types()
            .get(self.selected_type_index)
            .map(|t| t.name.clone())
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.confirm_popup.is_some() {
            self.handle_confirm_key(key);
            return;
        }
        if self.new_event_popup.is_some() {
            self.handle_new_event_key(key);
            return;
        }
        if self.edit_event_popup.is_some() {
            self.handle_edit_event_key(key);
            return;
        }
        if self.new_type_popup.is_some() {
            self.handle_new_type_key(key);
            return;
        }
        if self.type_color_popup.is_some() {
            self.handle_type_color_key(key);
            return;
        }
        if self.events_search_active {
            self.handle_events_search_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('h') => self.navigate_to(AppView::Calendar),
            KeyCode::Char('v') => self.navigate_to(AppView::Events),
            KeyCode::Char('t') => self.navigate_to(AppView::Types),
            KeyCode::Char('?') => {
                if self.view == AppView::Help {
                    self.go_back();
                } else {
                    self.navigate_to(AppView::Help);
                }
            }
            KeyCode::Char('/') => {
                if self.view == AppView::Events {
                    self.events_search_active = true;
                }
            }
            KeyCode::Tab => {
                if self.focus_mode == FocusMode::TabBar {
                    self.focus_mode = FocusMode::Content;
                } else {
                    self.focus_mode = FocusMode::TabBar;
                }
            }
            KeyCode::Char('r') => {
                self.quote = quotes::random_quote();
                self.refresh_snapshot();
                self.clear_status();
            }
            KeyCode::Left => {
                if self.focus_mode == FocusMode::TabBar {
                    self.navigate_tab_left();
                }
            }
            KeyCode::Right => {
                if self.focus_mode == FocusMode::TabBar {
                    self.navigate_tab_right();
                }
            }
            KeyCode::Up => {
                if self.focus_mode == FocusMode::Content {
                    self.move_selection_up();
                }
            }
            KeyCode::Down => {
                if self.focus_mode == FocusMode::Content {
                    self.move_selection_down();
                }
            }
            KeyCode::Enter => {
                if self.focus_mode == FocusMode::TabBar {
                    self.activate_selected_tab();
                }
            }
            KeyCode::Esc => self.go_back(),
            KeyCode::Char('n') => match self.view {
                AppView::Calendar | AppView::Events => self.open_new_event_popup(),
                AppView::Types => self.new_type_popup = Some(NewTypePopup::default()),
                AppView::Help => {}
            },
            KeyCode::Char('e') => {
                if self.view == AppView::Events {
                    self.open_edit_event_popup();
                }
            }
            KeyCode::Char('c') => {
                if self.view == AppView::Types {
                    self.open_type_color_popup();
                }
            }
            KeyCode::Char('d') => match self.view {
                AppView::Events => self.confirm_delete_event(),
                AppView::Types => self.confirm_delete_type(),
                _ => {}
            },
            KeyCode::Char('+') => self.adjust_lifespan(1),
            KeyCode::Char('-') => self.adjust_lifespan(-1),
            KeyCode::Char(']') => self.adjust_buffer(1),
            KeyCode::Char('[') => self.adjust_buffer(-1),
            _ => {}
        }
    }

    fn navigate_to(&mut self, view: AppView) {
        if self.view != view {
            self.view_history.push(self.view.clone());
            self.view = view;
            if self.view != AppView::Events {
                self.events_search_active = false;
            }
            if let Some(index) = TABS.iter().position(|v| *v == self.view) {
                self.selected_tab_index = index;
            }
            self.clear_status();
        }
    }

    fn navigate_tab_left(&mut self) {
        if self.selected_tab_index == 0 {
            self.selected_tab_index = TABS.len() - 1;
        } else {
            self.selected_tab_index -= 1;
        }
    }

    fn navigate_tab_right(&mut self) {
        self.selected_tab_index = (self.selected_tab_index + 1) % TABS.len();
    }

    fn activate_selected_tab(&mut self) {
        let target_view = TABS[self.selected_tab_index].clone();
        self.navigate_to(target_view);
        self.focus_mode = FocusMode::Content;
    }

    fn go_back(&mut self) {
        if let Some(prev_view) = self.view_history.pop() {
            self.view = prev_view;
            if let Some(index) = TABS.iter().position(|v| *v == self.view) {
                self.selected_tab_index = index;
            }
        }
        self.clear_status();
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn adjust_lifespan(&mut self, delta: i64) {
        let next = i64::from(self.profile.lifespan_years) + delta;
        let next = next.clamp(
            i64::from(*LIFESPAN_RANGE.start()),
            i64::from(*LIFESPAN_RANGE.end()),
        ) as u32;
        if next != self.profile.lifespan_years {
            self.profile.lifespan_years = next;
            self.refresh_snapshot();
        }
    }

    fn adjust_buffer(&mut self, delta: i64) {
        let next = i64::from(self.profile.buffer_years) + delta;
        let next = next.clamp(
            i64::from(*BUFFER_RANGE.start()),
            i64::from(*BUFFER_RANGE.end()),
        ) as u32;
        if next != self.profile.buffer_years {
            self.profile.buffer_years = next;
            self.refresh_snapshot();
        }
    }

    fn move_selection_up(&mut self) {
        match self.view {
            AppView::Calendar => {
                self.grid_scroll = self.grid_scroll.saturating_sub(1);
            }
            AppView::Events => {
                let len = self.visible_events().len();
                if len == 0 {
                    return;
                }
                if self.selected_event_index == 0 {
                    self.selected_event_index = len - 1;
                } else {
                    self.selected_event_index -= 1;
                }
            }
            AppView::Types => {
                let len = self.store.event_types().len();
                if len == 0 {
                    return;
                }
                if self.selected_type_index == 0 {
                    self.selected_type_index = len - 1;
                } else {
                    self.selected_type_index -= 1;
                }
            }
            AppView::Help => {}
        }
    }

    fn move_selection_down(&mut self) {
        match self.view {
            AppView::Calendar => {
                let rows = self.snapshot.display_years.max(0) as usize;
                if self.grid_scroll + 1 < rows {
                    self.grid_scroll += 1;
                }
            }
            AppView::Events => {
                let len = self.visible_events().len();
                if len == 0 {
                    return;
                }
                self.selected_event_index = (self.selected_event_index + 1) % len;
            }
            AppView::Types => {
                let len = self.store.event_types().len();
                if len == 0 {
                    return;
                }
                self.selected_type_index = (self.selected_type_index + 1) % len;
            }
            AppView::Help => {}
        }
    }

    fn clamp_selections(&mut self) {
        let events = self.visible_events().len();
        self.selected_event_index = self.selected_event_index.min(events.saturating_sub(1));
        let types = self.store.event_types().len();
        self.selected_type_index = self.selected_type_index.min(types.saturating_sub(1));
    }

    fn persist(&mut self) {
        if let Err(err) = db::save_store(&self.store, &self.db) {
            error!(error = %err, "failed to save store");
            self.status = Some(format!("Failed to save: {err}"));
        }
    }

    fn handle_events_search_key(&mut self, key: KeyCode) {
        if self.view != AppView::Events {
            self.events_search_active = false;
            return;
        }
        match key {
            KeyCode::Esc => {
                self.events_search_active = false;
                self.events_search_query.clear();
            }
            KeyCode::Enter => {
                self.events_search_active = false;
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.events_search_query.pop();
            }
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                self.events_search_query.push(ch);
            }
            _ => {}
        }
        self.selected_event_index = 0;
    }

    fn open_new_event_popup(&mut self) {
        let types: Vec<String> = self
            .store
            .event_types()
            .iter()
            .map(|t| t.name.clone())
            .collect();
        if types.is_empty() {
            self.status = Some("Add an event type first (t, then n).".to_string());
            return;
        }
        self.new_event_popup = Some(NewEventPopup {
            date: self.today.format(DATE_FORMAT).to_string(),
            title: String::new(),
            type_index: 0,
            types,
            field: NewEventField::Date,
        });
    }

    fn handle_new_event_key(&mut self, key: KeyCode) {
        let Some(popup) = self.new_event_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                self.new_event_popup = None;
                self.clear_status();
            }
            KeyCode::Enter => self.apply_new_event_popup(),
            KeyCode::Tab => {
                popup.field = match popup.field {
                    NewEventField::Date => NewEventField::Title,
                    NewEventField::Title => NewEventField::Type,
                    NewEventField::Type => NewEventField::Date,
                };
            }
            KeyCode::Up => {
                if popup.field == NewEventField::Type {
                    popup.select_prev();
                }
            }
            KeyCode::Down => {
                if popup.field == NewEventField::Type {
                    popup.select_next();
                }
            }
            KeyCode::Backspace | KeyCode::Delete => {
                if let Some(text) = popup.active_text() {
                    text.pop();
                }
            }
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                if let Some(text) = popup.active_text() {
                    text.push(ch);
                }
            }
            _ => {}
        }
    }

    fn apply_new_event_popup(&mut self) {
        let Some(popup) = self.new_event_popup.take() else {
            return;
        };
        let date = match parse_date(&popup.date) {
            Ok(date) => date,
            Err(_) => {
                self.status = Some("Date must be YYYY-MM-DD.".to_string());
                self.new_event_popup = Some(popup);
                return;
            }
        };
        let Some(type_name) = popup.types.get(popup.type_index).cloned() else {
            self.status = Some("Select an event type.".to_string());
            self.new_event_popup = Some(popup);
            return;
        };

        let week = self
            .store
            .add_event(self.profile.date_of_birth, date, popup.title.trim(), &type_name)
            .week;
        info!(week, "event added from tui");
        self.status = Some(format!("Event added on week {week}."));
        self.persist();
    }

    fn open_edit_event_popup(&mut self) {
        let Some(event) = self.selected_event() else {
            self.status = Some("No event selected.".to_string());
            return;
        };
        self.edit_event_popup = Some(EditEventPopup {
            event_id: event.id,
            title: event.title.clone(),
            age: event.age_years().to_string(),
            field: EditEventField::Title,
        });
    }

    fn handle_edit_event_key(&mut self, key: KeyCode) {
        let Some(popup) = self.edit_event_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                self.edit_event_popup = None;
                self.clear_status();
            }
            KeyCode::Enter => self.apply_edit_event_popup(),
            KeyCode::Tab => {
                popup.field = match popup.field {
                    EditEventField::Title => EditEventField::Age,
                    EditEventField::Age => EditEventField::Title,
                };
            }
            KeyCode::Backspace | KeyCode::Delete => {
                popup.active_text().pop();
            }
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                if popup.field == EditEventField::Age && !ch.is_ascii_digit() {
                    return;
                }
                popup.active_text().push(ch);
            }
            _ => {}
        }
    }

    fn apply_edit_event_popup(&mut self) {
        let Some(popup) = self.edit_event_popup.take() else {
            return;
        };
        let max_age = i64::from(self.profile.lifespan_years);
        let age = match popup.age.trim().parse::<i64>() {
            Ok(age) if (0..=max_age).contains(&age) => age,
            _ => {
                self.status = Some(format!("Age must be between 0 and {max_age}."));
                self.edit_event_popup = Some(popup);
                return;
            }
        };
        if self.store.edit_event(popup.event_id, popup.title.trim(), age) {
            self.status = Some("Event updated.".to_string());
            self.persist();
        } else {
            self.status = Some("No changes.".to_string());
        }
        self.clamp_selections();
    }

    fn confirm_delete_event(&mut self) {
        let Some(event) = self.selected_event() else {
            self.status = Some("No event selected.".to_string());
            return;
        };
        self.confirm_popup = Some(ConfirmPopup {
            message: format!("Delete event '{}'?", event.title),
            action: PendingAction::DeleteEvent(event.id),
        });
    }

    fn confirm_delete_type(&mut self) {
        let Some(name) = self.selected_type_name() else {
            self.status = Some("No event type selected.".to_string());
            return;
        };
        let orphaned = self
            .store
            .events()
            .iter()
            .filter(|e| e.type_name == name)
            .count();
        let message = if orphaned > 0 {
            format!("Delete type '{name}'? {orphaned} event(s) will keep the name.")
        } else {
            format!("Delete type '{name}'?")
        };
        self.confirm_popup = Some(ConfirmPopup {
            message,
            action: PendingAction::DeleteType(name),
        });
    }

    fn handle_confirm_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(popup) = self.confirm_popup.take() {
                    self.apply_pending_action(popup.action);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_popup = None;
            }
            _ => {}
        }
    }

    fn apply_pending_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::DeleteEvent(id) => match self.store.delete_event_by_id(id) {
                Some(event) => {
                    self.status = Some(format!("Event '{}' deleted.", event.title));
                    self.persist();
                }
                None => self.status = Some("Event no longer exists.".to_string()),
            },
            PendingAction::DeleteType(name) => {
                if self.store.delete_event_type(&name) {
                    self.status = Some(format!("Type '{name}' deleted."));
                    self.persist();
                } else {
                    self.status = Some(format!("Type '{name}' no longer exists."));
                }
            }
        }
        self.clamp_selections();
    }

    fn handle_new_type_key(&mut self, key: KeyCode) {
        let Some(popup) = self.new_type_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                self.new_type_popup = None;
                self.clear_status();
            }
            KeyCode::Enter => self.apply_new_type_popup(),
            KeyCode::Backspace | KeyCode::Delete => {
                popup.name.pop();
            }
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                popup.name.push(ch);
            }
            _ => {}
        }
    }

    fn apply_new_type_popup(&mut self) {
        let Some(popup) = self.new_type_popup.take() else {
            return;
        };
        let name = popup.name.trim().to_string();
        match self.store.add_event_type(&name) {
            AddTypeOutcome::Added => {
                self.status = Some(format!("Type '{name}' added."));
                self.persist();
                if let Some(index) = self
                    .store
                    .event_types()
                    .iter()
                    .position(|t| t.name == name)
                {
                    self.selected_type_index = index;
                }
            }
            AddTypeOutcome::Duplicate => {
                self.status = Some(format!("Type '{name}' already exists."));
                self.new_type_popup = Some(popup);
            }
            AddTypeOutcome::Empty => {
                self.status = Some("Type name is required.".to_string());
                self.new_type_popup = Some(popup);
            }
        }
    }

    fn open_type_color_popup(&mut self) {
        let Some(name) = self.selected_type_name() else {
            self.status = Some("No event type selected.".to_string());
            return;
        };
        let color = self.store.type_color(&name).unwrap_or_default().to_string();
        self.type_color_popup = Some(TypeColorPopup {
            type_name: name,
            color,
        });
    }

    fn handle_type_color_key(&mut self, key: KeyCode) {
        let Some(popup) = self.type_color_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => {
                self.type_color_popup = None;
                self.clear_status();
            }
            KeyCode::Enter => self.apply_type_color_popup(),
            KeyCode::Backspace | KeyCode::Delete => {
                popup.color.pop();
            }
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                popup.color.push(ch);
            }
            _ => {}
        }
    }

    fn apply_type_color_popup(&mut self) {
        let Some(popup) = self.type_color_popup.take() else {
            return;
        };
        let Some(color) = normalize_hex(&popup.color) else {
            self.status = Some("Color must be a 6-digit hex value.".to_string());
            self.type_color_popup = Some(popup);
            return;
        };
        if self.store.set_color(&popup.type_name, &color) {
            self.status = Some(format!("Color for '{}' set to {color}.", popup.type_name));
            self.persist();
        } else {
            self.status = Some(format!("Type '{}' no longer exists.", popup.type_name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app() -> App {
        let conn = db::init_in_memory().unwrap();
        let store = db::load_store(&conn).unwrap();
        App::new(conn, store, Profile::default(), date(2024, 8, 1))
    }

    fn press(app: &mut App, key: KeyCode) {
        app.update(AppEvent::KeyPress(key));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn clear_field(app: &mut App, len: usize) {
        for _ in 0..len {
            press(app, KeyCode::Backspace);
        }
    }

    #[test]
    fn starts_on_calendar_with_snapshot() {
        let app = app();
        assert_eq!(app.view, AppView::Calendar);
        assert_eq!(app.snapshot.current_age_years, 17);
        assert_eq!(app.snapshot.display_years, 19);
        assert!(app.running);
    }

    #[test]
    fn quits_on_q() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn adds_event_through_popup_and_persists() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert!(app.new_event_popup.is_some());
        clear_field(&mut app, 10);
        type_text(&mut app, "2007-10-10");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "First steps");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert!(app.new_event_popup.is_none());
        let event = &app.store.events()[0];
        assert_eq!(event.title, "First steps");
        assert_eq!(event.type_name, "Personal");
        assert_eq!(event.week, 10);

        let reloaded = db::load_store(&app.db).unwrap();
        assert_eq!(reloaded.events(), app.store.events());
    }

    #[test]
    fn invalid_date_keeps_popup_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        clear_field(&mut app, 10);
        type_text(&mut app, "someday");
        press(&mut app, KeyCode::Enter);
        assert!(app.new_event_popup.is_some());
        assert!(app.store.events().is_empty());
        assert!(app.status.is_some());
    }

    #[test]
    fn edits_age_of_selected_event() {
        let mut app = app();
        let dob = app.profile.date_of_birth;
        app.store.add_event(dob, date(2007, 10, 10), "Walk", "Personal");
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Tab);
        clear_field(&mut app, 3);
        type_text(&mut app, "4");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.events()[0].week, 208);
        assert_eq!(app.store.events()[0].date, date(2007, 10, 10));
    }

    #[test]
    fn editing_only_the_title_keeps_the_week() {
        let mut app = app();
        let dob = app.profile.date_of_birth;
        app.store.add_event(dob, date(2007, 10, 10), "Walk", "Personal");
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "ing");
        press(&mut app, KeyCode::Enter);
        let event = &app.store.events()[0];
        assert_eq!(event.title, "Walking");
        assert_eq!(event.week, 10);
    }

    #[test]
    fn search_filters_visible_events() {
        let mut app = app();
        let dob = app.profile.date_of_birth;
        app.store.add_event(dob, date(2010, 1, 1), "School", "Personal");
        app.store.add_event(dob, date(2012, 1, 1), "Trip", "International");
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "TRI");
        press(&mut app, KeyCode::Enter);
        let titles: Vec<_> = app.visible_events().iter().map(|e| e.title.clone()).collect();
        assert_eq!(titles, ["Trip"]);
        assert_eq!(app.store.events().len(), 2);
    }

    #[test]
    fn delete_event_requires_confirmation() {
        let mut app = app();
        let dob = app.profile.date_of_birth;
        app.store.add_event(dob, date(2010, 1, 1), "School", "Personal");
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('d'));
        assert!(app.confirm_popup.is_some());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.events().len(), 1);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.store.events().is_empty());
    }

    #[test]
    fn type_management_round_trip() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Work");
        press(&mut app, KeyCode::Enter);
        assert!(app.store.has_type("Work"));
        assert_eq!(app.selected_type_index, 3);

        press(&mut app, KeyCode::Char('c'));
        clear_field(&mut app, 7);
        type_text(&mut app, "00FF00");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.type_color("Work"), Some("#00ff00"));

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(!app.store.has_type("Work"));
        assert_eq!(app.selected_type_index, 2);
    }

    #[test]
    fn duplicate_type_keeps_popup_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Birthday");
        press(&mut app, KeyCode::Enter);
        assert!(app.new_type_popup.is_some());
        assert_eq!(app.store.event_types().len(), 3);
    }

    #[test]
    fn profile_adjustments_stay_in_range() {
        let mut app = app();
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('+'));
            press(&mut app, KeyCode::Char(']'));
        }
        assert_eq!(app.profile.lifespan_years, 100);
        assert_eq!(app.profile.buffer_years, 10);
        assert_eq!(app.snapshot.total_weeks, 5200);
        assert_eq!(app.snapshot.display_years, 27);
    }

    #[test]
    fn tab_bar_navigation_switches_views() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view, AppView::Types);
        assert_eq!(app.focus_mode, FocusMode::Content);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, AppView::Calendar);
    }
}
