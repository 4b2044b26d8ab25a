use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local};
use serde_with::serde_as;
use serde_with::TimestampSeconds;
use uuid::Uuid;

/// One completed round on a leaderboard. Fields are fixed at construction.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScoreEntry {
    id: Uuid,
    score: u32,
    moves: u32,
    #[serde_as(as = "TimestampSeconds")]
    timestamp: SystemTime,
}

impl ScoreEntry {
    pub fn new(score: u32, moves: u32) -> Self {
        Self::with_timestamp(score, moves, SystemTime::now())
    }

    pub fn with_timestamp(score: u32, moves: u32, timestamp: SystemTime) -> Self {
        // stored with whole-second precision
        let secs = timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self {
            id: Uuid::new_v4(),
            score,
            moves,
            timestamp: UNIX_EPOCH + Duration::from_secs(secs),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn local_time(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let entry = ScoreEntry::with_timestamp(40, 4, UNIX_EPOCH + Duration::from_secs(1_700_000_000));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["score"], 40);
        assert_eq!(value["moves"], 4);
        assert_eq!(value["timestamp"], 1_700_000_000);
        assert_eq!(value["id"], entry.id().to_string());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ScoreEntry::new(10, 1).id(), ScoreEntry::new(10, 1).id());
    }
}
