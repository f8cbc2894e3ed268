pub mod app;
pub mod cli;
pub mod clock;
pub mod color;
pub mod config;
pub mod db;
pub mod event;
pub mod logging;
pub mod quotes;
pub mod store;
pub mod tui;
pub mod types;
pub mod ui;
