use super::bank::WordBank;
use super::word::Difficulty;
use crate::date::DateKey;
use crate::error::{Error, Result};

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV-1a over the UTF-8 bytes of `s`.
pub fn fnv1a_32(s: &str) -> u32 {
    s.bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ u32::from(b)).wrapping_mul(FNV_PRIME))
}

/// Deterministic pick from `items` seeded by `seed`.
pub fn pick<'a, T>(items: &'a [T], seed: &str) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(fnv1a_32(seed) as usize % items.len())
}

pub fn select_difficulty(date: DateKey) -> Difficulty {
    let seed = format!("difficulty:{}", date);
    // ALL is non-empty, so pick always succeeds
    pick(&Difficulty::ALL, &seed)
        .copied()
        .unwrap_or(Difficulty::Medium)
}

/// Choose the tier and word for a date. Same date, same answer.
pub fn select_word(bank: &WordBank, date: DateKey) -> Result<(Difficulty, String)> {
    let difficulty = select_difficulty(date);
    let seed = format!("word:{}:{}", date, difficulty);
    let word = pick(bank.words(difficulty), &seed)
        .ok_or_else(|| Error::EmptyWordList(difficulty.to_string()))?;
    Ok((difficulty, word.clone()))
}
