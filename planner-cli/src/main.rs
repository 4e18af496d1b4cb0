mod commands;
mod render;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use planner_core::app::Planner;
use planner_core::bridge::FileBridge;
use planner_core::config::PlannerConfig;
use planner_core::protocol::MenuSignal;
use planner_core::store::{EventStore, FileSlot};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Context;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Plan events and see them as a dashboard, a calendar and a table")]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Counters and the next few upcoming events (default)
    Dashboard,
    /// All events as a table
    Events {
        /// Only show events whose name, type or location contains this
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Month grid with event days marked
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Create an event (prompts for anything missing)
    New {
        name: Option<String>,

        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Category tag, e.g. "birthday"
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Expected guests (unreadable values count as 0)
        #[arg(short, long)]
        guests: Option<String>,

        /// Budget (unreadable values count as 0)
        #[arg(short, long)]
        budget: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event by id
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show what is on a day, or start a new event on it
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Deliver a menu signal
    Menu {
        #[arg(value_enum)]
        signal: SignalArg,
    },
    /// Write the local event list to the shell's events file
    Export {
        /// Target file, defaults to the configured events_file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Replace the local event list with the shell's events file
    Import {
        /// Source file, defaults to the configured events_file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Talk to planner-shell directly
    Shell {
        #[command(subcommand)]
        action: ShellAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SignalArg {
    NewEvent,
    ExportEvents,
}

impl From<SignalArg> for MenuSignal {
    fn from(arg: SignalArg) -> Self {
        match arg {
            SignalArg::NewEvent => MenuSignal::NewEvent,
            SignalArg::ExportEvents => MenuSignal::ExportEvents,
        }
    }
}

#[derive(Subcommand)]
pub enum ShellAction {
    /// List events in the shell's file
    Load,
    /// Append an event to the shell's file
    Save {
        name: String,
        #[arg(short, long)]
        date: String,
        #[arg(short = 't', long = "type", default_value = "")]
        kind: String,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        guests: Option<String>,
        #[arg(short, long)]
        budget: Option<String>,
    },
    /// Remove an event from the shell's file
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlannerConfig::load_from(path)?,
        None => PlannerConfig::load()?,
    };
    init_tracing(&config.log_level);

    let today = Local::now().date_naive();
    let store = EventStore::open(FileSlot::new(config.data_path()));
    let mut ctx = Context {
        planner: Planner::new(store, today).with_upcoming_limit(config.upcoming_limit),
        bridge: FileBridge::new(config.events_file_path()),
        today,
    };

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => commands::dashboard::run(&ctx),
        Commands::Events { search } => commands::events::run(&mut ctx, search.as_deref()),
        Commands::Calendar { month } => commands::calendar::run(&mut ctx, month.as_deref()),
        Commands::New {
            name,
            date,
            kind,
            location,
            guests,
            budget,
            description,
        } => commands::new::run(
            &mut ctx,
            commands::new::NewArgs {
                name,
                date,
                kind,
                location,
                guests,
                budget,
                description,
            },
        ),
        Commands::Delete { id, yes } => commands::delete::run(&mut ctx, &id, yes),
        Commands::Day { date } => commands::day::run(&mut ctx, &date),
        Commands::Menu { signal } => commands::menu::run(&mut ctx, signal.into()).await,
        Commands::Export { file } => commands::transfer::export(&ctx, file).await,
        Commands::Import { file } => commands::transfer::import(&mut ctx, file).await,
        Commands::Shell { action } => commands::shell::run(action, &config).await,
    }
}

/// Log to stderr; RUST_LOG wins over the configured level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
