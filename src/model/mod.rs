mod board;
mod card;
mod difficulty;
mod score_entry;
mod selection;
mod session_command;
mod session_event;
pub mod session_snapshot;
mod session_state;
mod session_stats;
mod symbol;
mod tint;

pub use board::{Board, GRID_COLUMNS};
pub use card::Card;
pub use difficulty::Difficulty;
pub use score_entry::ScoreEntry;
pub use selection::Selection;
pub use session_command::SessionCommand;
pub use session_event::SessionEvent;
pub use session_snapshot::SessionSnapshot;
pub use session_state::SessionState;
pub use session_stats::{SessionStats, POINTS_PER_MATCH};
pub use symbol::Symbol;
pub use tint::Tint;
