//! CLI argument definitions for the Cicerone REPL.

use clap::{Parser, ValueEnum};

/// Cicerone chat REPL
#[derive(Parser, Debug)]
#[command(name = "cicerone", version, about = "Cicerone — chat agent REPL")]
pub struct Cli {
    /// Which bundled bot to run
    #[arg(value_enum, default_value_t = Bot::CountryInfo)]
    pub bot: Bot,

    /// Disable token streaming and print complete replies
    #[arg(long)]
    pub no_stream: bool,

    /// Model to use (overrides CICERONE_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,
}

/// The bundled bots.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Bot {
    CountryInfo,
    MoodTracker,
    SmartStore,
}
