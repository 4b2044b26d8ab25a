use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info, trace, warn};

use super::board_generator::{BoardGenerator, BoardMode};
use super::clock::{Clock, SystemClock};
use super::leaderboard_store::LeaderboardStore;
use super::scheduler::{Scheduler, SessionTask};
use super::settings::Settings;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{
    Board, Difficulty, ScoreEntry, Selection, SessionCommand, SessionEvent, SessionSnapshot,
    SessionState, SessionStats, POINTS_PER_MATCH,
};

pub const MATCH_SETTLE_DELAY: Duration = Duration::from_millis(400);
pub const MISMATCH_SETTLE_DELAY: Duration = Duration::from_millis(1000);
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub match_delay: Duration,
    pub mismatch_delay: Duration,
    pub tick_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            match_delay: MATCH_SETTLE_DELAY,
            mismatch_delay: MISMATCH_SETTLE_DELAY,
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl SessionConfig {
    /// A match must settle faster than a mismatch, and the countdown needs a
    /// non-zero interval. Anything else falls back to the defaults.
    pub fn validated(self) -> Self {
        if self.match_delay >= self.mismatch_delay || self.tick_interval.is_zero() {
            warn!(target: "session", "Invalid session config {:?}; using defaults", self);
            Self::default()
        } else {
            self
        }
    }
}

/// One player's round: board, selection, counters and countdown.
///
/// All mutation happens through `restart`, `flip`, `tick` and `advance` (or the
/// equivalent `SessionCommand`s). Deferred work (the countdown and the pair
/// settle delays) lives in a [`Scheduler`] and only runs when the host calls
/// `advance`; each task is stamped with the epoch current at scheduling time
/// and is dropped if a restart has happened since.
///
/// Events are emitted while the session is mutably borrowed, so listeners must
/// not call back into the session.
pub struct GameSession {
    difficulty: Difficulty,
    daily_mode: bool,
    board: Board,
    selection: Selection,
    stats: SessionStats,
    state: SessionState,
    completed_today: bool,
    epoch: u64,
    scheduler: Scheduler,
    config: SessionConfig,
    generator: BoardGenerator,
    leaderboard: LeaderboardStore,
    clock: Box<dyn Clock>,
    event_emitter: EventEmitter<SessionEvent>,
    debug_mode: bool,
    command_subscription: Option<Unsubscriber<SessionCommand>>,
}

impl GameSession {
    pub fn new(leaderboard: LeaderboardStore, event_emitter: EventEmitter<SessionEvent>) -> Self {
        Self {
            difficulty: Difficulty::default(),
            daily_mode: false,
            board: Board::default(),
            selection: Selection::default(),
            stats: SessionStats::default(),
            state: SessionState::Idle,
            completed_today: false,
            epoch: 0,
            scheduler: Scheduler::new(),
            config: SessionConfig::default(),
            generator: BoardGenerator::new(),
            leaderboard,
            clock: Box::new(SystemClock),
            event_emitter,
            debug_mode: Settings::is_debug_mode(),
            command_subscription: None,
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config.validated();
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_generator(mut self, generator: BoardGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Moves the session behind `Rc<RefCell<_>>` and feeds it every command
    /// published on `command_observer`.
    pub fn wire(self, command_observer: &EventObserver<SessionCommand>) -> Rc<RefCell<Self>> {
        let session = Rc::new(RefCell::new(self));
        let handler = Rc::downgrade(&session);
        let subscription = command_observer.subscribe(move |command| {
            if let Some(session) = handler.upgrade() {
                session.borrow_mut().handle_command(command.clone());
            }
        });
        session.borrow_mut().command_subscription = Some(subscription);
        session
    }

    /// Stops listening for commands published on the wired observer.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.command_subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn handle_command(&mut self, command: SessionCommand) -> SessionSnapshot {
        trace!(target: "session", "Handling command: {:?}", command);
        match command {
            SessionCommand::Restart(difficulty, daily_mode) => self.restart(difficulty, daily_mode),
            SessionCommand::ChangeDifficulty(difficulty) => {
                self.restart(difficulty, self.daily_mode)
            }
            SessionCommand::Flip(index) => self.flip(index),
            SessionCommand::Tick => self.tick(),
            SessionCommand::Advance(elapsed) => self.advance(elapsed),
            SessionCommand::ResetHighScore => self.reset_high_score(),
        }
        self.snapshot()
    }

    pub fn restart(&mut self, difficulty: Difficulty, daily_mode: bool) {
        if self.state.is_live() {
            self.event_emitter.emit(SessionEvent::RoundStopped);
        }
        self.epoch += 1;
        self.scheduler.clear();

        let today = self.clock.today();
        let mode = if daily_mode {
            BoardMode::Daily(today)
        } else {
            BoardMode::Random
        };

        self.difficulty = difficulty;
        self.daily_mode = daily_mode;
        self.board = self.generator.generate(difficulty, mode);
        self.selection = Selection::default();
        self.stats = SessionStats::new(
            difficulty.time_limit_seconds(),
            self.leaderboard.load_high_score(difficulty),
        );
        self.completed_today = self
            .leaderboard
            .is_completed_today(difficulty, self.clock.as_ref());
        self.state = SessionState::Playing;

        info!(
            target: "session",
            "New round; difficulty: {}; daily: {}; epoch: {}",
            difficulty, daily_mode, self.epoch
        );
        if self.debug_mode {
            debug!(target: "session", "Board: {:?}", self.board);
        }

        self.scheduler
            .schedule(self.config.tick_interval, self.epoch, SessionTask::Tick);
        self.event_emitter.emit(SessionEvent::RoundStarted {
            difficulty,
            daily_mode,
            tint: difficulty.tint(),
        });
    }

    /// Turns a card face up. Ignored for out-of-range indices, cards already
    /// face up, and whenever the round is not accepting input.
    pub fn flip(&mut self, index: usize) {
        if self.state != SessionState::Playing || self.selection.input_locked {
            return;
        }
        let Some(card) = self.board.get(index) else {
            return;
        };
        if !card.is_flippable() {
            return;
        }

        self.board.reveal(index);
        self.event_emitter.emit(SessionEvent::CardRevealed(index));

        let Some(first) = self.selection.pending else {
            self.scheduler.cancel_where(|scheduled| {
                matches!(scheduled.task, SessionTask::Resolve { .. })
            });
            self.selection.pending = Some(index);
            return;
        };

        self.stats.moves += 1;
        self.selection.input_locked = true;
        self.state = SessionState::Resolving;

        let matched = self.board.symbol_at(first) == self.board.symbol_at(index);
        let delay = if matched {
            self.config.match_delay
        } else {
            self.config.mismatch_delay
        };
        trace!(
            target: "session",
            "Pair {} / {} {}; settling in {:?}",
            first,
            index,
            if matched { "matches" } else { "differs" },
            delay
        );
        self.scheduler.schedule(
            delay,
            self.epoch,
            SessionTask::Resolve {
                first,
                second: index,
                matched,
            },
        );
    }

    /// One second of countdown. Reaching zero ends the round without saving.
    pub fn tick(&mut self) {
        if !self.state.is_live() {
            return;
        }
        if self.stats.time_remaining > 0 {
            self.stats.time_remaining -= 1;
            self.event_emitter
                .emit(SessionEvent::TimerTicked(self.stats.time_remaining));
        }
        if self.stats.time_remaining == 0 {
            self.expire();
        }
    }

    /// Lets `elapsed` pass, running every scheduled callback that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some(scheduled) = self.scheduler.pop_due(deadline) {
            if scheduled.epoch != self.epoch {
                trace!(target: "session", "Discarding stale {:?}", scheduled);
                continue;
            }
            self.run_task(scheduled.task);
        }
        self.scheduler.settle_at(deadline);
    }

    fn run_task(&mut self, task: SessionTask) {
        match task {
            SessionTask::Tick => {
                self.tick();
                if self.state.is_live() {
                    self.scheduler
                        .schedule(self.config.tick_interval, self.epoch, SessionTask::Tick);
                }
            }
            SessionTask::Resolve {
                first,
                second,
                matched,
            } => {
                if self.state == SessionState::Resolving {
                    self.resolve(first, second, matched);
                }
            }
        }
    }

    fn resolve(&mut self, first: usize, second: usize, matched: bool) {
        if matched {
            self.board.mark_matched(first);
            self.board.mark_matched(second);
            self.stats.score += POINTS_PER_MATCH;
            self.event_emitter
                .emit(SessionEvent::PairMatched { first, second });
        } else {
            self.board.hide(first);
            self.board.hide(second);
            self.event_emitter
                .emit(SessionEvent::PairMismatched { first, second });
        }
        self.selection.clear();
        self.state = SessionState::Playing;

        if matched && self.board.is_complete() {
            self.win();
        }
    }

    fn win(&mut self) {
        self.scheduler.clear();
        self.state = SessionState::Won;

        if self.stats.score > self.stats.high_score {
            self.stats.high_score = self.stats.score;
            self.leaderboard
                .save_high_score(self.difficulty, self.stats.score);
            self.event_emitter
                .emit(SessionEvent::HighScoreChanged(self.stats.score));
        }

        let entry =
            ScoreEntry::with_timestamp(self.stats.score, self.stats.moves, self.clock.now());
        self.leaderboard
            .save_score_entry(self.difficulty, entry.clone());

        if self.daily_mode {
            self.leaderboard
                .mark_completed_today(self.difficulty, self.clock.as_ref());
            self.completed_today = true;
        }

        info!(
            target: "session",
            "Round won; score: {}; moves: {}; time left: {}s",
            self.stats.score, self.stats.moves, self.stats.time_remaining
        );
        self.event_emitter.emit(SessionEvent::RoundWon(entry));
        self.event_emitter.emit(SessionEvent::RoundStopped);
    }

    fn expire(&mut self) {
        // an unsettled pair is abandoned with the round
        self.scheduler.clear();
        self.selection.clear();
        self.state = SessionState::Expired;
        info!(
            target: "session",
            "Round expired; score: {}; moves: {}",
            self.stats.score, self.stats.moves
        );
        self.event_emitter.emit(SessionEvent::RoundExpired);
        self.event_emitter.emit(SessionEvent::RoundStopped);
    }

    pub fn reset_high_score(&mut self) {
        self.leaderboard.reset_high_score(self.difficulty);
        self.stats.high_score = 0;
        self.event_emitter.emit(SessionEvent::HighScoreChanged(0));
    }

    pub fn average_score(&self, difficulty: Difficulty) -> u32 {
        self.leaderboard.average_score(difficulty)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            difficulty: self.difficulty,
            daily_mode: self.daily_mode,
            board: self.board.clone(),
            pending: self.selection.pending,
            input_locked: self.selection.input_locked,
            stats: self.stats,
            completed_today: self.completed_today,
            average_score: self.average_score(self.difficulty),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn daily_mode(&self) -> bool {
        self.daily_mode
    }

    pub fn completed_today(&self) -> bool {
        self.completed_today
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn leaderboard(&self) -> &LeaderboardStore {
        &self.leaderboard
    }

    pub fn leaderboard_mut(&mut self) -> &mut LeaderboardStore {
        &mut self.leaderboard
    }

    pub fn has_pending_resolution(&self) -> bool {
        self.scheduler
            .pending()
            .any(|scheduled| matches!(scheduled.task, SessionTask::Resolve { .. }))
    }
}
