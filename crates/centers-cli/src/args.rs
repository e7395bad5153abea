use clap::{Parser, Subcommand};

/// CLI arguments for centers
#[derive(Debug, Parser)]
#[command(
    name = "centers",
    version,
    about = "Browse the centers directory by country, state and district"
)]
pub struct CliArgs {
    /// Base URL of the centers API (e.g. https://example.org/api)
    #[arg(long = "api-url", env = "API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long = "timeout",
        env = "API_TIMEOUT_SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all countries with their center counts
    Countries,

    /// List the states of a country
    States {
        /// Country name (case and accent insensitive)
        country: String,
    },

    /// List the districts of a state
    Districts {
        country: String,
        state: String,
    },

    /// Show the centers of a district
    Centers {
        country: String,
        state: String,
        district: String,

        /// Print the raw center records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Walk country → state → district interactively
    Browse,
}
