use serde::{Deserialize, Serialize};

/// Background tint a front end may apply for the active difficulty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tint {
    Green,
    Orange,
    Red,
}

impl Tint {
    pub const OPACITY: f32 = 0.2;

    pub fn name(&self) -> &'static str {
        match self {
            Tint::Green => "green",
            Tint::Orange => "orange",
            Tint::Red => "red",
        }
    }
}
