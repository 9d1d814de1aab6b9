//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "courtside")]
#[command(
    author,
    version,
    about = "Ask NBA questions answered from live basketball stats"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Answer a question
    Ask(QuestionArgs),

    /// Show how a question is interpreted, without fetching stats
    Intent(QuestionArgs),

    /// Run a stats lookup directly
    Stats(StatsArgs),

    /// Show the effective configuration
    Config,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args)]
pub struct QuestionArgs {
    /// The question
    pub question: Vec<String>,
}

impl QuestionArgs {
    pub fn text(&self) -> String {
        self.question.join(" ")
    }
}

#[derive(Args)]
pub struct StatsArgs {
    /// player-stats, team-stats, roster, games, standings or head-to-head
    pub category: String,

    #[arg(long)]
    pub player: Option<String>,

    #[arg(long)]
    pub team: Option<String>,

    /// First team of a head-to-head
    #[arg(long)]
    pub team1: Option<String>,

    /// Second team of a head-to-head
    #[arg(long)]
    pub team2: Option<String>,

    /// Season, e.g. 2023, 2023-24 or 2023-2024
    #[arg(long)]
    pub season: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
