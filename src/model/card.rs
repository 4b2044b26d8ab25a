use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Symbol;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub symbol: Symbol,
    pub(crate) revealed: bool,
    /// Once set the card stays face up for the rest of the round.
    pub(crate) matched: bool,
}

impl Card {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol,
            revealed: false,
            matched: false,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// A card accepts a flip only while it is face down and unresolved.
    pub fn is_flippable(&self) -> bool {
        !self.revealed && !self.matched
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.matched {
            write!(f, "[{}]", self.symbol)
        } else if self.revealed {
            write!(f, "<{}>", self.symbol)
        } else {
            write!(f, "##")
        }
    }
}
