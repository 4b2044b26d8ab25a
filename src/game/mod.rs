pub mod audio;
pub mod board_generator;
pub mod clock;
pub mod leaderboard_store;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod shuffler;
pub mod store;

pub use audio::{AudioCues, AudioSink, LoggingAudio};
pub use board_generator::{BoardGenerator, BoardMode};
pub use clock::{Clock, FixedClock, SystemClock};
pub use leaderboard_store::{LeaderboardStore, LEADERBOARD_CAPACITY};
pub use session::{GameSession, SessionConfig};
pub use settings::Settings;
pub use shuffler::{seed_for_date, DeterministicShuffler};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
