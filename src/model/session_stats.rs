use serde::{Deserialize, Serialize};

pub const POINTS_PER_MATCH: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    /// Completed pair attempts; bumped on the second flip of each pair.
    pub moves: u32,
    pub time_remaining: u32,
    pub high_score: u32,
}

impl SessionStats {
    pub fn new(time_remaining: u32, high_score: u32) -> Self {
        Self {
            score: 0,
            moves: 0,
            time_remaining,
            high_score,
        }
    }
}
