//! Progress command: show a player's points and streaks.

use anyhow::Result;
use doodle::{AppConfig, DocumentStore};

use crate::cli_utils;

pub fn run(config: &AppConfig, uid: &str, json: bool) -> Result<()> {
    let (documents, _) = cli_utils::open_stores(config);
    let progress = documents.progress(uid)?.unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    println!("Player:      {}", uid);
    println!("Points:      {}", progress.points_total);
    println!("Streak:      {}", progress.streak_current);
    println!("Best streak: {}", progress.streak_best);
    match progress.last_win_date {
        Some(date) => println!("Last win:    {}", date),
        None => println!("Last win:    -"),
    }
    Ok(())
}
