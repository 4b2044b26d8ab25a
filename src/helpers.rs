use std::time::Duration;

use crate::model::{Difficulty, ScoreEntry};

pub trait Capitalize {
    fn capitalize(&self) -> String;
}

impl Capitalize for str {
    fn capitalize(&self) -> String {
        let mut chars = self.chars();
        match chars.next() {
            Some(first) => {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            }
            None => String::new(),
        }
    }
}

pub fn leaderboard_title(difficulty: Difficulty) -> String {
    format!("{} Leaderboard", difficulty.key().capitalize())
}

/// `"3. Score: 40, Moves: 4  2026-10-16 14:03"`
pub fn format_entry(rank: usize, entry: &ScoreEntry) -> String {
    format!(
        "{}. Score: {}, Moves: {}  {}",
        rank,
        entry.score(),
        entry.moves(),
        entry.local_time().format("%Y-%m-%d %H:%M")
    )
}

pub fn format_seconds(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!("medium".capitalize(), "Medium");
        assert_eq!("".capitalize(), "");
    }

    #[test]
    fn test_leaderboard_title() {
        assert_eq!(leaderboard_title(Difficulty::Hard), "Hard Leaderboard");
    }

    #[test]
    fn test_format_entry() {
        let line = format_entry(1, &ScoreEntry::new(150, 20));
        assert!(line.starts_with("1. Score: 150, Moves: 20  "), "{}", line);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::from_secs(45)), "00:45");
        assert_eq!(format_seconds(Duration::from_secs(60)), "01:00");
    }
}
