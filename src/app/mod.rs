mod state;

use crossterm::event::KeyCode;

pub use state::{
    App, ConfirmPopup, EditEventField, EditEventPopup, NewEventField, NewEventPopup,
    NewTypePopup, PendingAction, TypeColorPopup,
};

/// Possible input events the app reacts to.
pub enum AppEvent {
    Tick,
    KeyPress(KeyCode),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppView {
    Calendar,
    Events,
    Types,
    Help,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMode {
    TabBar,
    Content,
}

/// Views reachable from the tab bar, in display order.
pub const TABS: [AppView; 3] = [AppView::Calendar, AppView::Events, AppView::Types];
