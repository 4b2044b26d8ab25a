use super::{Difficulty, ScoreEntry, Tint};

/// Fire-and-forget notifications for audio, theming and display layers.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    RoundStarted {
        difficulty: Difficulty,
        daily_mode: bool,
        tint: Tint,
    },
    RoundStopped,
    CardRevealed(usize),
    PairMatched { first: usize, second: usize },
    PairMismatched { first: usize, second: usize },
    TimerTicked(u32),
    HighScoreChanged(u32),
    RoundWon(ScoreEntry),
    RoundExpired,
}
