use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::info;

use lifeweeks::{app, cli, event, logging, tui};

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    let config = cli::load_config(&cli_opts)?;
    if let Err(err) = logging::init(&config.logging.level, &logging::default_log_dir()) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let mut session = cli::Session::open(&cli_opts, &config)?;
    let today = Local::now().date_naive();
    if let Some(command) = cli_opts.command {
        return cli::run(command, &mut session, today);
    }

    info!("starting tui");
    let mut app = app::App::new(session.conn, session.store, session.profile, today);
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    tui::restore()?;

    result
}
