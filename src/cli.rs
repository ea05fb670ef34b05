use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::usecases::book_session::DEFAULT_SESSION_MINUTES;

#[derive(Debug, Parser)]
#[command(name = "soultalk", about = "Browse consultation experts and chat with them")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List ongoing chats
    Chats,
    /// List experts, optionally filtered by name or specialty
    Experts {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show the featured experts
    Featured {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one expert's profile
    Show { expert: String },
    /// Chat with an expert interactively
    Chat { expert: String },
    /// Quote a session with an expert
    Book {
        expert: String,
        /// Session length in minutes (15-90, steps of 15)
        #[arg(short, long, default_value_t = DEFAULT_SESSION_MINUTES)]
        minutes: u32,
        /// Session start as RFC 3339 (default: one hour from now)
        #[arg(long, value_parser = parse_start)]
        at: Option<DateTime<Utc>>,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chats)
    }
}

fn parse_start(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|start| start.with_timezone(&Utc))
        .map_err(|error| format!("invalid RFC 3339 time '{raw}': {error}"))
}
