use chrono::NaiveDate;
use clap::Parser;

/// One line typed at the prompt.
#[derive(Debug, Parser, PartialEq)]
#[command(author, version, about, long_about = None)]
pub enum Command {
    #[command(about = "Seat a new player", alias = "seat")]
    Add {
        #[arg(required = true)]
        name: String,
    },
    #[command(about = "Buy a player into the pot", alias = "in")]
    Buyin {
        #[arg(required = true)]
        name: String,
        #[arg(required = true)]
        amount: f64,
    },
    #[command(about = "Pay a player out of the pot", alias = "out")]
    Cashout {
        #[arg(required = true)]
        name: String,
        #[arg(required = true)]
        amount: f64,
    },
    #[command(about = "Take a player off the ledger, leaving their money in the pot")]
    Remove {
        #[arg(required = true)]
        name: String,
    },
    #[command(about = "Bench a player or bring them back in", alias = "bench")]
    Toggle {
        #[arg(required = true)]
        name: String,
    },
    #[command(about = "Show the pot, players and standings", alias = "ls")]
    Table,
    #[command(about = "Write the ledger and sessions now")]
    Save,
    #[command(about = "Close the current game and start a new one")]
    End,
    #[command(about = "Record a played session", alias = "log")]
    Record {
        #[arg(required = true)]
        hours: f64,
        #[arg(required = true, allow_hyphen_values = true)]
        profit: f64,
        #[arg(long, help = "Day played, YYYY-MM-DD (default today)")]
        date: Option<NaiveDate>,
        #[arg(long, num_args = 1..)]
        notes: Vec<String>,
    },
    #[command(about = "Correct a session by its list number")]
    Edit {
        #[arg(required = true)]
        index: usize,
        #[arg(required = true)]
        hours: f64,
        #[arg(required = true, allow_hyphen_values = true)]
        profit: f64,
        #[arg(long, num_args = 1..)]
        notes: Vec<String>,
    },
    #[command(about = "Delete a session by its list number", alias = "rm")]
    Delete {
        #[arg(required = true)]
        index: usize,
    },
    #[command(about = "List sessions with totals and hourly rate", alias = "history")]
    Sessions,
    #[command(about = "Show the last persistence outcome")]
    Health,
}

impl Command {
    /// Parse a prompt line the way a shell would split it.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(std::iter::once("> ").chain(line.split_whitespace()))
    }

    /// Rejoin free-text notes that were split on whitespace.
    pub fn notes(words: &[String]) -> Option<String> {
        Some(words.join(" ")).filter(|n| !n.is_empty())
    }
}
