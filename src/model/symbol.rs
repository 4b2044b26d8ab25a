use serde::{Deserialize, Serialize};

/// Face image of a card. The palette is fixed; a board uses a subset of it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Symbol {
    Flower,
    Star,
    Moon,
    Heart,
    Sun,
    Cloud,
    Bolt,
    Leaf,
    Flame,
    Drop,
}

impl Symbol {
    pub const PALETTE: [Symbol; 10] = [
        Symbol::Flower,
        Symbol::Star,
        Symbol::Moon,
        Symbol::Heart,
        Symbol::Sun,
        Symbol::Cloud,
        Symbol::Bolt,
        Symbol::Leaf,
        Symbol::Flame,
        Symbol::Drop,
    ];

    /// Image identifier understood by the renderer.
    pub fn image_name(&self) -> &'static str {
        match self {
            Symbol::Flower => "flower",
            Symbol::Star => "star",
            Symbol::Moon => "moon",
            Symbol::Heart => "heart",
            Symbol::Sun => "sun.max",
            Symbol::Cloud => "cloud",
            Symbol::Bolt => "bolt",
            Symbol::Leaf => "leaf",
            Symbol::Flame => "flame",
            Symbol::Drop => "drop",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.image_name())
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.image_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_palette_is_distinct() {
        let names: HashSet<_> = Symbol::PALETTE.iter().map(|s| s.image_name()).collect();
        assert_eq!(names.len(), Symbol::PALETTE.len());
        assert!(Symbol::PALETTE.len() >= 10);
    }
}
