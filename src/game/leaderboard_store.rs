use chrono::NaiveDate;
use log::{trace, warn};

use super::clock::Clock;
use super::store::{KeyValueStore, StoreError};
use crate::model::{Difficulty, ScoreEntry};

pub const LEADERBOARD_CAPACITY: usize = 10;

/// Persisted high scores, per-difficulty leaderboards and daily completion flags.
///
/// Reads never fail: missing, unreadable or malformed values come back as empty
/// or zero. Writes report whether they reached the store.
pub struct LeaderboardStore {
    store: Box<dyn KeyValueStore>,
}

fn high_score_key(difficulty: Difficulty) -> String {
    format!("HighScore_{}", difficulty.key())
}

fn leaderboard_key(difficulty: Difficulty) -> String {
    format!("Leaderboard_{}", difficulty.key())
}

fn daily_completed_key(difficulty: Difficulty, date: NaiveDate) -> String {
    format!("DailyCompleted_{}_{}", difficulty.key(), date.format("%Y-%m-%d"))
}

impl LeaderboardStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(target: "leaderboard", "Could not read {}: {}", key, err);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> bool {
        match self.store.set(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(target: "leaderboard", "Could not write {}: {}", key, err);
                false
            }
        }
    }

    fn delete(&mut self, key: &str) -> bool {
        match self.store.remove(key) {
            Ok(()) => true,
            Err(err) => {
                warn!(target: "leaderboard", "Could not remove {}: {}", key, err);
                false
            }
        }
    }

    pub fn load_leaderboard(&self, difficulty: Difficulty) -> Vec<ScoreEntry> {
        let key = leaderboard_key(difficulty);
        let Some(contents) = self.read(&key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<ScoreEntry>>(&contents) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(target: "leaderboard", "{}: {}", key, StoreError::from(err));
                Vec::new()
            }
        }
    }

    /// Inserts `entry`, keeps the best `LEADERBOARD_CAPACITY` by score and writes
    /// the whole list back as a single value.
    pub fn save_score_entry(&mut self, difficulty: Difficulty, entry: ScoreEntry) -> bool {
        let mut entries = self.load_leaderboard(difficulty);
        entries.push(entry);
        // stable: among equal scores the earlier entry keeps its rank
        entries.sort_by(|a, b| b.score().cmp(&a.score()));
        entries.truncate(LEADERBOARD_CAPACITY);

        match serde_json::to_string(&entries) {
            Ok(contents) => {
                trace!(target: "leaderboard", "Saving {} entries for {}", entries.len(), difficulty);
                self.write(&leaderboard_key(difficulty), &contents)
            }
            Err(err) => {
                warn!(target: "leaderboard", "Could not encode leaderboard: {}", err);
                false
            }
        }
    }

    /// Integer mean of the persisted scores, truncated; zero when empty.
    pub fn average_score(&self, difficulty: Difficulty) -> u32 {
        let entries = self.load_leaderboard(difficulty);
        if entries.is_empty() {
            return 0;
        }
        let total: u64 = entries.iter().map(|entry| u64::from(entry.score())).sum();
        (total / entries.len() as u64) as u32
    }

    pub fn load_high_score(&self, difficulty: Difficulty) -> u32 {
        let key = high_score_key(difficulty);
        self.read(&key)
            .and_then(|contents| match contents.trim().parse::<u32>() {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(target: "leaderboard", "Ignoring malformed {}: {}", key, err);
                    None
                }
            })
            .unwrap_or(0)
    }

    pub fn save_high_score(&mut self, difficulty: Difficulty, value: u32) -> bool {
        self.write(&high_score_key(difficulty), &value.to_string())
    }

    pub fn reset_high_score(&mut self, difficulty: Difficulty) -> bool {
        self.delete(&high_score_key(difficulty))
    }

    /// Flags are stored per date, so a new day reads as not completed without
    /// anything being cleared.
    pub fn is_completed_on(&self, difficulty: Difficulty, date: NaiveDate) -> bool {
        self.read(&daily_completed_key(difficulty, date))
            .and_then(|contents| serde_json::from_str::<bool>(&contents).ok())
            .unwrap_or(false)
    }

    pub fn mark_completed_on(&mut self, difficulty: Difficulty, date: NaiveDate) -> bool {
        self.write(&daily_completed_key(difficulty, date), "true")
    }

    /// "Today" is whatever `clock` says, so callers holding a fixed clock agree
    /// with the session that wrote the flag.
    pub fn is_completed_today(&self, difficulty: Difficulty, clock: &dyn Clock) -> bool {
        self.is_completed_on(difficulty, clock.today())
    }

    pub fn mark_completed_today(&mut self, difficulty: Difficulty, clock: &dyn Clock) -> bool {
        self.mark_completed_on(difficulty, clock.today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::clock::FixedClock;
    use crate::game::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_scores(scores: &[u32]) -> LeaderboardStore {
        let mut leaderboard = LeaderboardStore::new(MemoryStore::new());
        for (i, &score) in scores.iter().enumerate() {
            leaderboard.save_score_entry(Difficulty::Easy, ScoreEntry::new(score, i as u32));
        }
        leaderboard
    }

    #[test]
    fn test_empty_leaderboard() {
        let leaderboard = LeaderboardStore::new(MemoryStore::new());
        assert!(leaderboard.load_leaderboard(Difficulty::Easy).is_empty());
        assert_eq!(leaderboard.average_score(Difficulty::Easy), 0);
        assert_eq!(leaderboard.load_high_score(Difficulty::Easy), 0);
    }

    #[test]
    fn test_sorted_descending_and_capped() {
        let scores: Vec<u32> = (1..=14).map(|n| (n * 37 % 15) * 10).collect();
        let leaderboard = store_with_scores(&scores);

        let entries = leaderboard.load_leaderboard(Difficulty::Easy);
        assert_eq!(entries.len(), LEADERBOARD_CAPACITY);
        assert!(entries.windows(2).all(|w| w[0].score() >= w[1].score()));

        let mut expected = scores.clone();
        expected.sort_by(|a, b| b.cmp(a));
        expected.truncate(LEADERBOARD_CAPACITY);
        let actual: Vec<u32> = entries.iter().map(|e| e.score()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_average_truncates() {
        let leaderboard = store_with_scores(&[150, 120, 100]);
        assert_eq!(leaderboard.average_score(Difficulty::Easy), 123);
        assert_eq!(leaderboard.average_score(Difficulty::Hard), 0);
    }

    #[test]
    fn test_difficulties_are_independent() {
        let mut leaderboard = store_with_scores(&[40]);
        leaderboard.save_high_score(Difficulty::Medium, 60);
        assert!(leaderboard.load_leaderboard(Difficulty::Medium).is_empty());
        assert_eq!(leaderboard.load_high_score(Difficulty::Easy), 0);
        assert_eq!(leaderboard.load_high_score(Difficulty::Medium), 60);
    }

    #[test]
    fn test_corrupt_values_read_as_absent() {
        let leaderboard = LeaderboardStore::new(MemoryStore::with_values([
            ("Leaderboard_easy", "{not json"),
            ("HighScore_easy", "lots"),
            ("DailyCompleted_easy_2026-10-16", "maybe"),
        ]));
        assert!(leaderboard.load_leaderboard(Difficulty::Easy).is_empty());
        assert_eq!(leaderboard.load_high_score(Difficulty::Easy), 0);
        assert!(!leaderboard.is_completed_on(Difficulty::Easy, date(2026, 10, 16)));
    }

    #[test]
    fn test_corrupt_leaderboard_is_replaced_on_save() {
        let mut leaderboard =
            LeaderboardStore::new(MemoryStore::with_values([("Leaderboard_easy", "[{]")]));
        assert!(leaderboard.save_score_entry(Difficulty::Easy, ScoreEntry::new(30, 5)));
        assert_eq!(leaderboard.load_leaderboard(Difficulty::Easy).len(), 1);
    }

    #[test]
    fn test_unavailable_store_is_a_no_op() {
        let mut store = MemoryStore::new();
        store.set_available(false);
        let mut leaderboard = LeaderboardStore::new(store);
        assert!(!leaderboard.save_score_entry(Difficulty::Easy, ScoreEntry::new(10, 1)));
        assert!(!leaderboard.save_high_score(Difficulty::Easy, 10));
        assert!(!leaderboard.mark_completed_on(Difficulty::Easy, date(2026, 10, 16)));
        assert!(leaderboard.load_leaderboard(Difficulty::Easy).is_empty());
    }

    #[test]
    fn test_high_score_reset() {
        let mut leaderboard = LeaderboardStore::new(MemoryStore::new());
        leaderboard.save_high_score(Difficulty::Hard, 90);
        assert_eq!(leaderboard.load_high_score(Difficulty::Hard), 90);
        assert!(leaderboard.reset_high_score(Difficulty::Hard));
        assert_eq!(leaderboard.load_high_score(Difficulty::Hard), 0);
    }

    #[test]
    fn test_completion_flag_is_per_day_and_difficulty() {
        let mut leaderboard = LeaderboardStore::new(MemoryStore::new());
        let today = date(2026, 10, 16);
        leaderboard.mark_completed_on(Difficulty::Easy, today);

        assert!(leaderboard.is_completed_on(Difficulty::Easy, today));
        assert!(!leaderboard.is_completed_on(Difficulty::Hard, today));
        assert!(!leaderboard.is_completed_on(Difficulty::Easy, date(2026, 10, 17)));
    }

    #[test]
    fn test_persisted_layout() {
        let mut store = MemoryStore::new();
        store.set("Leaderboard_medium", "[]").unwrap();
        let mut leaderboard = LeaderboardStore::new(store);
        leaderboard.save_score_entry(Difficulty::Medium, ScoreEntry::new(60, 6));
        let entries = leaderboard.load_leaderboard(Difficulty::Medium);
        assert_eq!((entries[0].score(), entries[0].moves()), (60, 6));
    }

    #[test]
    fn test_completed_today_follows_the_given_clock() {
        let mut leaderboard = LeaderboardStore::new(MemoryStore::new());
        let leap_day = FixedClock::on(date(2024, 2, 29));
        let next_day = FixedClock::on(date(2024, 3, 1));

        assert!(!leaderboard.is_completed_today(Difficulty::Easy, &leap_day));
        assert!(leaderboard.mark_completed_today(Difficulty::Easy, &leap_day));
        assert!(leaderboard.is_completed_today(Difficulty::Easy, &leap_day));
        assert!(leaderboard.is_completed_on(Difficulty::Easy, date(2024, 2, 29)));
        assert!(!leaderboard.is_completed_today(Difficulty::Easy, &next_day));
        assert!(!leaderboard.is_completed_today(Difficulty::Hard, &leap_day));
    }
}
