use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;
use memory_match::events::Channel;
use memory_match::game::session::{MATCH_SETTLE_DELAY, MISMATCH_SETTLE_DELAY};
use memory_match::game::{
    FixedClock, GameSession, LeaderboardStore, MemoryStore, LEADERBOARD_CAPACITY,
};
use memory_match::model::{Board, Difficulty, SessionCommand, SessionEvent, SessionState};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn session() -> (GameSession, Rc<RefCell<Vec<SessionEvent>>>) {
    let (emitter, observer) = Channel::<SessionEvent>::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    observer.subscribe(move |event: &SessionEvent| sink.borrow_mut().push(event.clone()));
    let session = GameSession::new(LeaderboardStore::new(MemoryStore::new()), emitter)
        .with_clock(FixedClock::on(today()));
    (session, events)
}

fn pairs(board: &Board) -> Vec<(usize, usize)> {
    board
        .symbols()
        .into_iter()
        .filter_map(|symbol| board.pair_of(symbol))
        .collect()
}

fn clear_board(session: &mut GameSession) {
    for (first, second) in pairs(session.board()) {
        session.handle_command(SessionCommand::Flip(first));
        session.handle_command(SessionCommand::Flip(second));
        session.handle_command(SessionCommand::Advance(MATCH_SETTLE_DELAY));
    }
}

#[test]
fn easy_round_played_to_completion() {
    let (mut session, events) = session();
    session.handle_command(SessionCommand::Restart(Difficulty::Easy, false));
    let board = session.board().clone();
    assert_eq!(board.len(), 8);

    let (first, second) = pairs(&board)[0];
    let snapshot = session.handle_command(SessionCommand::Flip(first));
    assert_eq!(snapshot.pending, Some(first));
    assert_eq!(snapshot.stats.moves, 0);

    let snapshot = session.handle_command(SessionCommand::Flip(second));
    assert_eq!(snapshot.stats.moves, 1);
    assert_eq!(snapshot.state, SessionState::Resolving);

    let snapshot = session.handle_command(SessionCommand::Advance(MATCH_SETTLE_DELAY));
    assert_eq!(snapshot.stats.score, 10);
    assert_eq!(snapshot.pending, None);
    assert!(snapshot.board.get(first).unwrap().is_matched());
    assert!(snapshot.board.get(second).unwrap().is_matched());

    clear_board(&mut session);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, SessionState::Won);
    assert_eq!(snapshot.stats.score, 40);
    assert_eq!(snapshot.stats.moves, 4);

    let entries = session.leaderboard().load_leaderboard(Difficulty::Easy);
    assert_eq!(entries.len(), 1);
    assert_eq!((entries[0].score(), entries[0].moves()), (40, 4));
    assert!(events
        .borrow()
        .iter()
        .any(|event| matches!(event, SessionEvent::RoundWon(entry) if entry.score() == 40)));
}

#[test]
fn mismatches_count_moves_but_not_points() {
    let (mut session, _) = session();
    session.restart(Difficulty::Medium, false);
    let pairs = pairs(session.board());

    for window in pairs.windows(2).take(3) {
        session.flip(window[0].0);
        session.flip(window[1].0);
        session.advance(MISMATCH_SETTLE_DELAY);
    }
    let stats = session.stats();
    assert_eq!(stats.moves, 3);
    assert_eq!(stats.score, 0);
    assert_eq!(stats.time_remaining, 42);
    assert!(session.board().cards().iter().all(|card| !card.is_revealed()));
}

#[test]
fn repeated_wins_keep_leaderboard_bounded_and_sorted() {
    let (mut session, _) = session();
    for _ in 0..(LEADERBOARD_CAPACITY + 3) {
        session.restart(Difficulty::Easy, false);
        // vary the score-to-moves ratio with a wasted attempt
        let pairs = pairs(session.board());
        session.flip(pairs[0].0);
        session.flip(pairs[1].0);
        session.advance(MISMATCH_SETTLE_DELAY);
        clear_board(&mut session);
        assert_eq!(session.state(), SessionState::Won);
    }

    let entries = session.leaderboard().load_leaderboard(Difficulty::Easy);
    assert_eq!(entries.len(), LEADERBOARD_CAPACITY);
    assert!(entries.windows(2).all(|w| w[0].score() >= w[1].score()));
    assert!(entries.iter().all(|entry| entry.score() == 40 && entry.moves() == 5));
    assert_eq!(session.average_score(Difficulty::Easy), 40);
}

#[test]
fn timeout_leaves_persistence_untouched() {
    let (mut session, events) = session();
    session.restart(Difficulty::Hard, false);
    let (first, second) = pairs(session.board())[0];
    session.flip(first);
    session.flip(second);
    session.advance(MATCH_SETTLE_DELAY);
    assert_eq!(session.stats().score, 10);

    session.advance(Duration::from_secs(60));
    assert_eq!(session.state(), SessionState::Expired);
    assert_eq!(session.stats().time_remaining, 0);
    assert!(session.leaderboard().load_leaderboard(Difficulty::Hard).is_empty());
    assert_eq!(session.leaderboard().load_high_score(Difficulty::Hard), 0);

    let ticks = events
        .borrow()
        .iter()
        .filter(|event| matches!(event, SessionEvent::TimerTicked(_)))
        .count();
    assert_eq!(ticks, 30);
}

#[test]
fn daily_boards_match_across_sessions() {
    let (mut alice, _) = session();
    let (mut bob, _) = session();
    alice.restart(Difficulty::Medium, true);
    bob.restart(Difficulty::Medium, true);
    assert_eq!(alice.board().symbols(), bob.board().symbols());
}
