use std::time::Duration;

use super::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Restart(Difficulty, bool), // difficulty, daily mode
    ChangeDifficulty(Difficulty),
    Flip(usize),
    Tick,
    Advance(Duration),
    ResetHighScore,
}
