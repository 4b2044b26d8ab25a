use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionState {
    /// No board dealt yet.
    #[default]
    Idle,
    Playing,
    /// A second card is face up and the pair is waiting to settle. Input is locked.
    Resolving,
    Won,
    Expired,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Expired)
    }

    /// The countdown runs in these states.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Playing | Self::Resolving)
    }
}
