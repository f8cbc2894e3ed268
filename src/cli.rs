/// CLI argument parsing and command handling.
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing::info;

use crate::clock::WEEKS_PER_YEAR;
use crate::color::normalize_hex;
use crate::config::{self, Config, parse_date, validate_profile};
use crate::db;
use crate::quotes;
use crate::store::{AddTypeOutcome, EventStore};
use crate::types::{EventId, LifeSnapshot, Profile};

#[derive(Parser)]
#[command(
    name = "lifeweeks",
    version,
    about = "Lifeweeks - Your life in weeks, in the terminal"
)]
pub struct Cli {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub dob: Option<String>,
    /// Target lifespan in years (50-100)
    #[arg(long, global = true)]
    pub lifespan: Option<u32>,
    /// Future preview in years (0-10)
    #[arg(long, global = true)]
    pub buffer: Option<u32>,
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Database file path
    #[arg(long, global = true)]
    pub db: Option<String>,
    /// Keep events for this run only
    #[arg(long, global = true)]
    pub in_memory: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Weeks lived, weeks left and percent completed
    Summary,
    /// The week grid as text
    Grid,
    /// Every event with its color, type, date and week
    Legend,
    /// A random motivational quote
    Quote,
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },
    Type {
        #[command(subcommand)]
        command: TypeCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommand {
    Add {
        #[arg(short = 'd', long = "date")]
        date: String,
        #[arg(short = 't', long = "title")]
        title: String,
        #[arg(short = 'k', long = "type")]
        type_name: String,
    },
    List {
        #[arg(short = 's', long = "search")]
        search: Option<String>,
    },
    /// Change the title and/or the age (age moves the event to week age x 52)
    Edit {
        id: EventId,
        #[arg(short = 't', long = "title")]
        title: Option<String>,
        #[arg(short = 'a', long = "age")]
        age: Option<i64>,
    },
    Delete {
        id: EventId,
    },
}

#[derive(Subcommand, Debug)]
pub enum TypeCommand {
    Add { name: String },
    Delete { name: String },
    Color { name: String, color: String },
    List,
}

/// Everything a command or the TUI needs: storage, events and the profile.
pub struct Session {
    pub conn: Connection,
    pub store: EventStore,
    pub profile: Profile,
}

/// Loads the config file named on the command line, or the default one.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    Config::load(&path)
}

impl Session {
    pub fn open(cli: &Cli, config: &Config) -> Result<Self> {
        let profile = resolve_profile(cli, config)?;
        let conn = if cli.in_memory || config.storage.in_memory {
            db::init_in_memory()?
        } else {
            let path = cli
                .db
                .clone()
                .or_else(|| config.storage.path.clone())
                .unwrap_or_else(db::default_db_path);
            db::init(&path)?
        };
        let store = db::load_store(&conn)?;
        Ok(Self {
            conn,
            store,
            profile,
        })
    }

    fn save(&self) -> Result<()> {
        db::save_store(&self.store, &self.conn)
    }
}

/// Command line flags win over the config file.
pub fn resolve_profile(cli: &Cli, config: &Config) -> Result<Profile> {
    let mut profile = config.profile()?;
    if let Some(dob) = &cli.dob {
        profile.date_of_birth = parse_date(dob)?;
    }
    if let Some(lifespan) = cli.lifespan {
        profile.lifespan_years = lifespan;
    }
    if let Some(buffer) = cli.buffer {
        profile.buffer_years = buffer;
    }
    validate_profile(&profile)?;
    Ok(profile)
}

/// Execute a CLI command.
pub fn run(command: Command, session: &mut Session, today: NaiveDate) -> Result<()> {
    match command {
        Command::Summary => print!("{}", render_summary(&session.profile.snapshot(today))),
        Command::Grid => {
            let snapshot = session.profile.snapshot(today);
            print!("{}", render_grid(&session.store, &snapshot));
        }
        Command::Legend => print!("{}", render_legend(&session.store)),
        Command::Quote => println!("{}", quotes::random_quote()),
        Command::Event {
            command:
                EventCommand::Add {
                    date,
                    title,
                    type_name,
                },
        } => handle_event_add(date, title, type_name, session)?,
        Command::Event {
            command: EventCommand::List { search },
        } => handle_event_list(search, session),
        Command::Event {
            command: EventCommand::Edit { id, title, age },
        } => handle_event_edit(id, title, age, session)?,
        Command::Event {
            command: EventCommand::Delete { id },
        } => handle_event_delete(id, session)?,
        Command::Type {
            command: TypeCommand::Add { name },
        } => handle_type_add(name, session)?,
        Command::Type {
            command: TypeCommand::Delete { name },
        } => handle_type_delete(name, session)?,
        Command::Type {
            command: TypeCommand::Color { name, color },
        } => handle_type_color(name, color, session)?,
        Command::Type {
            command: TypeCommand::List,
        } => {
            for event_type in session.store.event_types() {
                println!("{}  {}", event_type.color, event_type.name);
            }
        }
    }
    Ok(())
}

fn handle_event_add(
    date: String,
    title: String,
    type_name: String,
    session: &mut Session,
) -> Result<()> {
    let date = match parse_date(&date) {
        Ok(date) => date,
        Err(_) => {
            println!("Invalid date '{date}'. Use YYYY-MM-DD.");
            return Ok(());
        }
    };
    if !session.store.has_type(&type_name) {
        println!("Type '{type_name}' is not declared; the event will use the fallback color.");
    }
    let dob = session.profile.date_of_birth;
    let event = session.store.add_event(dob, date, &title, &type_name);
    println!("Added event {} '{}' on week {}.", event.id, event.title, event.week);
    info!(id = event.id, "event added from cli");
    session.save()
}

fn handle_event_list(search: Option<String>, session: &Session) {
    let query = search.unwrap_or_default();
    let events = session.store.search_events(&query);
    if events.is_empty() {
        println!("No events found.");
        return;
    }
    for event in events {
        println!(
            "{:>4}  {}  week {:>4}  age {:>3}  [{}]  {}",
            event.id,
            event.date.format(config::DATE_FORMAT),
            event.week,
            event.age_years(),
            event.type_name,
            event.title
        );
    }
}

fn handle_event_edit(
    id: EventId,
    title: Option<String>,
    age: Option<i64>,
    session: &mut Session,
) -> Result<()> {
    let Some(event) = session.store.event(id) else {
        println!("Event {id} not found.");
        return Ok(());
    };
    let title = title.unwrap_or_else(|| event.title.clone());
    let age = age.unwrap_or_else(|| event.age_years());
    let max_age = i64::from(session.profile.lifespan_years);
    if !(0..=max_age).contains(&age) {
        println!("Age must be between 0 and {max_age}.");
        return Ok(());
    }
    if session.store.edit_event(id, &title, age) {
        println!("Event {id} updated.");
        session.save()?;
    } else {
        println!("Nothing to change.");
    }
    Ok(())
}

fn handle_event_delete(id: EventId, session: &mut Session) -> Result<()> {
    match session.store.delete_event_by_id(id) {
        Some(event) => {
            println!("Deleted event {id} '{}'.", event.title);
            session.save()
        }
        None => {
            println!("Event {id} not found.");
            Ok(())
        }
    }
}

fn handle_type_add(name: String, session: &mut Session) -> Result<()> {
    match session.store.add_event_type(&name) {
        AddTypeOutcome::Added => {
            println!("Type '{}' added.", name.trim());
            session.save()
        }
        AddTypeOutcome::Duplicate => {
            println!("Type '{}' already exists.", name.trim());
            Ok(())
        }
        AddTypeOutcome::Empty => {
            println!("Type name is required.");
            Ok(())
        }
    }
}

fn handle_type_delete(name: String, session: &mut Session) -> Result<()> {
    if session.store.delete_event_type(&name) {
        println!("Type '{name}' deleted.");
        session.save()
    } else {
        println!("Type '{name}' not found.");
        Ok(())
    }
}

fn handle_type_color(name: String, color: String, session: &mut Session) -> Result<()> {
    let Some(color) = normalize_hex(&color) else {
        println!("Invalid color format. Please provide a hex code like #RRGGBB.");
        return Ok(());
    };
    if session.store.set_color(&name, &color) {
        println!("Type '{name}' is now {color}.");
        session.save()
    } else {
        println!("Type '{name}' not found.");
        Ok(())
    }
}

pub fn render_summary(snapshot: &LifeSnapshot) -> String {
    format!(
        "Age:            {}\n\
         Weeks lived:    {}\n\
         Weeks left:     {}\n\
         Total weeks:    {}\n\
         Life completed: {}\n",
        snapshot.current_age_years,
        snapshot.weeks_lived,
        snapshot.weeks_left,
        snapshot.total_weeks,
        snapshot.format_percent()
    )
}

/// One row per year: `*` event, `#` lived, `.` future.
pub fn render_grid(store: &EventStore, snapshot: &LifeSnapshot) -> String {
    let mut out = String::new();
    for (year, row) in store
        .grid(snapshot)
        .chunks(WEEKS_PER_YEAR as usize)
        .enumerate()
    {
        out.push_str(&format!("{year:>3} "));
        for cell in row {
            let symbol = if cell.event_id.is_some() {
                '*'
            } else if cell.week < snapshot.weeks_lived {
                '#'
            } else {
                '.'
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

pub fn render_legend(store: &EventStore) -> String {
    let mut out = String::new();
    for entry in store.legend() {
        out.push_str(&format!(
            "{}  {} ({}) on {} (Week {})\n",
            entry.color,
            entry.title,
            entry.type_name,
            entry.date.format(config::DATE_FORMAT),
            entry.week
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(2007, 8, 1).unwrap()
    }

    #[test]
    fn summary_lists_every_stat() {
        let snapshot = clock::summary(dob(), NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(), 90, 2);
        let text = render_summary(&snapshot);
        assert!(text.contains("Age:            17"));
        assert!(text.contains(&format!("Weeks lived:    {}", snapshot.weeks_lived)));
        assert!(text.contains("Total weeks:    4680"));
        assert!(text.contains(&snapshot.format_percent()));
    }

    #[test]
    fn grid_marks_lived_future_and_events() {
        let mut store = EventStore::with_default_types();
        store.add_event(dob(), dob() + chrono::Duration::days(14), "Two", "Personal");
        let snapshot = clock::summary(dob(), dob() + chrono::Duration::days(35), 90, 1);
        let text = render_grid(&store, &snapshot);
        let rows: Vec<_> = text.lines().collect();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("  0 ##*##."));
        assert_eq!(rows[0].chars().filter(|c| *c == '.').count(), 47);
    }

    #[test]
    fn legend_uses_fallback_for_removed_types() {
        let mut store = EventStore::with_default_types();
        store.add_event(dob(), dob(), "Born", "Birthday");
        store.add_event(dob(), dob(), "Gone", "Removed");
        let text = render_legend(&store);
        assert_eq!(
            text,
            "#4da6ff  Born (Birthday) on 2007-08-01 (Week 0)\n\
             #000000  Gone (Removed) on 2007-08-01 (Week 0)\n"
        );
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "lifeweeks",
            "--dob",
            "1990-01-02",
            "--lifespan",
            "70",
            "summary",
        ]);
        let profile = resolve_profile(&cli, &Config::default()).unwrap();
        assert_eq!(profile.date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 2).unwrap());
        assert_eq!(profile.lifespan_years, 70);
        assert_eq!(profile.buffer_years, clock::DEFAULT_BUFFER_YEARS);
    }

    #[test]
    fn out_of_range_flags_are_rejected() {
        let cli = Cli::parse_from(["lifeweeks", "--buffer", "12"]);
        assert!(resolve_profile(&cli, &Config::default()).is_err());
    }

    #[test]
    fn event_commands_parse() {
        let cli = Cli::parse_from([
            "lifeweeks",
            "event",
            "add",
            "--date",
            "2010-01-01",
            "--title",
            "Moved",
            "--type",
            "Personal",
        ]);
        match cli.command {
            Some(Command::Event {
                command: EventCommand::Add { date, title, type_name },
            }) => {
                assert_eq!(date, "2010-01-01");
                assert_eq!(title, "Moved");
                assert_eq!(type_name, "Personal");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
