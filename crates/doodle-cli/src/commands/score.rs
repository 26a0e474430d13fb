//! Score command: run the scoring state machine with the OpenAI classifier.

use anyhow::{Result, bail};
use doodle::{AppConfig, AttemptScorer, Error, OpenAiClassifier, ScoreOutcome, SkipReason};

use crate::cli_utils;

pub fn run(config: &AppConfig, attempt_id: &str, api_key: Option<&str>) -> Result<()> {
    let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) else {
        bail!("OpenAI API key required (--api-key or OPENAI_API_KEY)");
    };

    let (documents, rasters) = cli_utils::open_stores(config);
    let classifier = OpenAiClassifier::new(api_key.to_string(), &config.classifier);
    let scorer = AttemptScorer::new(&documents, &rasters, &classifier);

    match scorer.score(attempt_id)? {
        ScoreOutcome::Scored(verdict) => {
            println!(
                "Guess: {} (confidence {:.2}, threshold {:.2})",
                verdict.guess, verdict.confidence, verdict.threshold
            );
            println!("{}", if verdict.is_win { "WIN" } else { "No win" });
            println!(
                "Points: {}  Streak: {}  Best: {}",
                verdict.progress.points_total,
                verdict.progress.streak_current,
                verdict.progress.streak_best
            );
        }
        ScoreOutcome::Failed(message) => {
            println!("Scoring failed: {}", message);
        }
        ScoreOutcome::Skipped(SkipReason::NotFound) => {
            return Err(Error::AttemptNotFound(attempt_id.to_string()).into());
        }
        ScoreOutcome::Skipped(reason) => {
            println!("Skipped: {:?}", reason);
        }
    }
    Ok(())
}
