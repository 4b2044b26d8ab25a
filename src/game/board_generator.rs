use chrono::NaiveDate;
use log::{debug, trace};
use rand::seq::SliceRandom;

use super::shuffler::{seed_for_date, DeterministicShuffler};
use crate::model::{Board, Difficulty, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardMode {
    Random,
    /// Symbol selection is seeded from the date; card positions stay random.
    Daily(NaiveDate),
}

#[derive(Debug, Clone, Default)]
pub struct BoardGenerator {
    /// Replaces the date-derived daily seed, for reproducing a reported board.
    forced_seed: Option<i64>,
}

impl BoardGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forced_seed(seed: Option<i64>) -> Self {
        Self { forced_seed: seed }
    }

    pub fn generate(&self, difficulty: Difficulty, mode: BoardMode) -> Board {
        let selected = self.select_symbols(difficulty, mode);

        let mut deck: Vec<Symbol> = selected.iter().chain(selected.iter()).copied().collect();
        deck.shuffle(&mut rand::rng());

        let board = Board::from_symbols(&deck);
        trace!(target: "board", "Generated board: {:?}", board);
        board
    }

    /// The `pair_count` symbols a board for `difficulty` will use.
    pub fn select_symbols(&self, difficulty: Difficulty, mode: BoardMode) -> Vec<Symbol> {
        let mut palette = Symbol::PALETTE.to_vec();
        match mode {
            BoardMode::Random => palette.shuffle(&mut rand::rng()),
            BoardMode::Daily(date) => {
                let seed = self.forced_seed.unwrap_or_else(|| seed_for_date(date));
                debug!(target: "board", "Daily board for {}; seed: {}", date, seed);
                DeterministicShuffler::new(seed).shuffle(&mut palette);
            }
        }
        palette.truncate(difficulty.pair_count().min(Symbol::PALETTE.len()));
        palette
    }
}
