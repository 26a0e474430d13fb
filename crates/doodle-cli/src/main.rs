mod cli;
mod cli_utils;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("doodle_cli=warn,doodle=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = cli_utils::load_config(&args.config, args.data_dir.as_deref())?;

    match args.command {
        Command::Fill {
            input,
            output,
            x,
            y,
            color,
            tolerance,
            no_diagonals,
            erase,
        } => commands::fill::run(
            &config,
            &input,
            &output,
            commands::fill::FillArgs {
                x,
                y,
                color,
                tolerance,
                no_diagonals,
                erase,
            },
        ),
        Command::DailyWord { date, bank } => {
            commands::daily_word::run(&config, date.as_deref(), bank.as_deref())
        }
        Command::Submit { uid, image, date } => {
            commands::submit::run(&config, &uid, &image, date.as_deref())
        }
        Command::Score { attempt, api_key } => {
            commands::score::run(&config, &attempt, api_key.as_deref())
        }
        Command::Progress { uid, json } => commands::progress::run(&config, &uid, json),
    }
}
