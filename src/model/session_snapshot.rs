use serde::{Deserialize, Serialize};

use super::{Board, Difficulty, SessionState, SessionStats};

/// Read-only view of a session handed to whatever draws the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub difficulty: Difficulty,
    pub daily_mode: bool,
    pub board: Board,
    pub pending: Option<usize>,
    pub input_locked: bool,
    pub stats: SessionStats,
    pub completed_today: bool,
    pub average_score: u32,
}

