//! CLI argument definitions for doodle.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "doodle")]
#[command(about = "Daily Doodle game tools", version)]
pub struct Args {
    /// Data directory holding rasters and documents (overrides the config file)
    #[arg(long, env = "DOODLE_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<String>,

    /// Configuration file (ignored if missing)
    #[arg(long, value_name = "FILE", default_value = "doodle.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Bucket fill a PNG
    Fill {
        /// Input PNG
        #[arg(long, short)]
        input: String,
        /// Output PNG
        #[arg(long, short)]
        output: String,
        /// Seed column
        #[arg(long)]
        x: u32,
        /// Seed row
        #[arg(long)]
        y: u32,
        /// Fill color (#rgb or #rrggbb)
        #[arg(long, default_value = "#000000")]
        color: String,
        /// Color tolerance, 0-160 (default from config)
        #[arg(long)]
        tolerance: Option<u8>,
        /// Only spread to orthogonal neighbours
        #[arg(long)]
        no_diagonals: bool,
        /// Fill with transparency instead of a color
        #[arg(long)]
        erase: bool,
    },
    /// Generate (if absent) and print the daily word
    DailyWord {
        /// Date key (yyyy-mm-dd, default: today in UTC)
        #[arg(long)]
        date: Option<String>,
        /// Word bank JSON (default: config or built-in)
        #[arg(long, value_name = "FILE")]
        bank: Option<String>,
    },
    /// Upload a doodle and open a pending attempt
    Submit {
        /// Player id
        #[arg(long)]
        uid: String,
        /// Doodle PNG
        #[arg(long, value_name = "FILE")]
        image: String,
        /// Date key (yyyy-mm-dd, default: today in UTC)
        #[arg(long)]
        date: Option<String>,
    },
    /// Score a pending attempt with the vision classifier
    Score {
        /// Attempt id ({uid}_{date})
        #[arg(long)]
        attempt: String,
        /// OpenAI API key
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// Show a player's points and streaks
    Progress {
        /// Player id
        #[arg(long)]
        uid: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
