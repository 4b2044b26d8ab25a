use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub pending: Option<usize>,
    pub input_locked: bool,
}

impl Selection {
    pub fn clear(&mut self) {
        self.pending = None;
        self.input_locked = false;
    }
}
