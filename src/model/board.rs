use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Card, Symbol};

pub const GRID_COLUMNS: usize = 4;

/// Ordered cards of one round. Positions never move once dealt.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Deals a fresh face-down card for every symbol, in order.
    pub fn from_symbols(symbols: &[Symbol]) -> Self {
        Self::new(symbols.iter().map(|&symbol| Card::new(symbol)).collect())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn symbol_at(&self, index: usize) -> Option<Symbol> {
        self.cards.get(index).map(|card| card.symbol)
    }

    pub fn reveal(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.revealed = true;
        }
    }

    pub fn hide(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            if !card.matched {
                card.revealed = false;
            }
        }
    }

    pub fn mark_matched(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.revealed = true;
            card.matched = true;
        }
    }

    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|card| card.matched).count()
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.matched)
    }

    /// Indexed cards laid out `GRID_COLUMNS` to a row, each row ending in a newline.
    pub fn grid(&self) -> String {
        let mut output = String::new();
        for (index, card) in self.cards.iter().enumerate() {
            output.push_str(&format!("{:>2}:{:<10}", index, card.to_string()));
            if index % GRID_COLUMNS == GRID_COLUMNS - 1 || index + 1 == self.cards.len() {
                output.push('\n');
            }
        }
        output
    }

    pub fn symbol_counts(&self) -> HashMap<Symbol, usize> {
        self.cards.iter().map(|card| card.symbol).counts()
    }

    /// Distinct symbols in sorted order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.cards
            .iter()
            .map(|card| card.symbol)
            .unique()
            .sorted()
            .collect()
    }

    /// Indices of the two cards showing `symbol`, if the board holds exactly a pair of it.
    pub fn pair_of(&self, symbol: Symbol) -> Option<(usize, usize)> {
        self.cards
            .iter()
            .positions(|card| card.symbol == symbol)
            .collect_tuple()
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\n{}", self.grid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_board() -> Board {
        Board::from_symbols(&[Symbol::Star, Symbol::Moon, Symbol::Moon, Symbol::Star])
    }

    #[test]
    fn test_pair_of() {
        let board = sample_board();
        assert_eq!(board.pair_of(Symbol::Star), Some((0, 3)));
        assert_eq!(board.pair_of(Symbol::Moon), Some((1, 2)));
        assert_eq!(board.pair_of(Symbol::Leaf), None);
    }

    #[test]
    fn test_matched_card_cannot_be_hidden() {
        let mut board = sample_board();
        board.mark_matched(1);
        board.hide(1);
        let card = board.get(1).unwrap();
        assert!(card.revealed && card.matched);
    }

    #[test]
    fn test_matched_cards_are_always_face_up() {
        let mut board = sample_board();
        board.mark_matched(0);
        board.reveal(1);
        board.hide(0);
        board.hide(1);
        assert!(board
            .cards()
            .iter()
            .all(|card| !card.is_matched() || card.is_revealed()));
        assert!(board.get(0).unwrap().is_revealed());
        assert!(!board.get(1).unwrap().is_revealed());
    }

    #[test]
    fn test_is_complete() {
        let mut board = sample_board();
        assert!(!board.is_complete());
        for index in 0..board.len() {
            board.mark_matched(index);
        }
        assert!(board.is_complete());
        assert!(!Board::default().is_complete());
    }

    #[test]
    fn test_grid_rows() {
        assert_eq!(sample_board().grid().lines().count(), 1);

        let board = Board::from_symbols(&[Symbol::Star; 5]);
        let grid = board.grid();
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with(" 0:##"));
        assert!(rows[1].starts_with(" 4:##"));
        assert!(grid.ends_with('\n'));
        assert!(Board::default().grid().is_empty());
    }

    #[test]
    fn test_symbols_sorted_and_unique() {
        assert_eq!(sample_board().symbols(), vec![Symbol::Star, Symbol::Moon]);
    }
}
