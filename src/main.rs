use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use memory_match::events::{attach_handler, Channel};
use memory_match::game::{
    AudioCues, BoardGenerator, FileStore, GameSession, LeaderboardStore, LoggingAudio, Settings,
};
use memory_match::helpers::{format_entry, format_seconds, leaderboard_title};
use memory_match::model::{Difficulty, SessionEvent, SessionSnapshot, SessionState, Tint};

#[derive(Parser, Debug)]
#[command(version, about = "Memory matching card game", long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a round in the terminal
    Play {
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        /// Use today's shared symbol set
        #[arg(long)]
        daily: bool,
    },
    /// Show the best scores
    Leaderboard {
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Forget the stored high score
    ResetHighScore {
        #[arg(short, long)]
        difficulty: Difficulty,
    },
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => (),
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let data_dir = Settings::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;
    let settings = Settings::load(&data_dir);

    match args.command {
        Command::Play { difficulty, daily } => play(
            &settings,
            &data_dir,
            difficulty.unwrap_or(settings.difficulty),
            daily || settings.daily_mode,
        ),
        Command::Leaderboard { difficulty } => {
            let leaderboard = LeaderboardStore::new(FileStore::new(&data_dir));
            let difficulties = match difficulty {
                Some(difficulty) => vec![difficulty],
                None => Difficulty::all(),
            };
            for difficulty in difficulties {
                print_leaderboard(&leaderboard, difficulty);
            }
            Ok(())
        }
        Command::ResetHighScore { difficulty } => {
            let mut leaderboard = LeaderboardStore::new(FileStore::new(&data_dir));
            if !leaderboard.reset_high_score(difficulty) {
                anyhow::bail!("could not reset the {} high score", difficulty);
            }
            println!("High score for {} cleared", difficulty);
            Ok(())
        }
    }
}

fn print_leaderboard(leaderboard: &LeaderboardStore, difficulty: Difficulty) {
    println!("🏆 {}", leaderboard_title(difficulty));
    println!(
        "High Score: {} | Average Score: {}",
        leaderboard.load_high_score(difficulty),
        leaderboard.average_score(difficulty)
    );
    for (i, entry) in leaderboard.load_leaderboard(difficulty).iter().enumerate() {
        println!("  {}", format_entry(i + 1, entry));
    }
    println!();
}

fn render(snapshot: &SessionSnapshot) {
    println!();
    println!(
        "Level: {}{} | High Score: {} | Average Score: {}",
        snapshot.difficulty,
        if snapshot.daily_mode { " (daily)" } else { "" },
        snapshot.stats.high_score,
        snapshot.average_score
    );
    println!(
        "Score: {} | Moves: {} | ⏱️ {}",
        snapshot.stats.score,
        snapshot.stats.moves,
        format_seconds(Duration::from_secs(u64::from(snapshot.stats.time_remaining)))
    );
    print!("{}", snapshot.board.grid());
}

fn play(
    settings: &Settings,
    data_dir: &Path,
    difficulty: Difficulty,
    daily: bool,
) -> anyhow::Result<()> {
    let (event_emitter, event_observer) = Channel::<SessionEvent>::new();
    let audio = Rc::new(RefCell::new(AudioCues::new(
        LoggingAudio,
        settings.background_music,
    )));
    let _audio_subscription = attach_handler(&event_observer, audio);
    let _outcome_subscription = event_observer.subscribe(|event| match event {
        SessionEvent::RoundWon(entry) => {
            println!("🎉 You Won! Your Score: {} Moves: {}", entry.score(), entry.moves())
        }
        SessionEvent::RoundExpired => println!("⏰ Time's up!"),
        SessionEvent::RoundStarted { tint, .. } => log::debug!(
            target: "theme",
            "background tint {} at {:.0}%",
            tint.name(),
            Tint::OPACITY * 100.0
        ),
        _ => (),
    });

    let config = settings.session_config();
    let leaderboard = LeaderboardStore::new(FileStore::new(data_dir));
    let mut session = GameSession::new(leaderboard, event_emitter)
        .with_config(config)
        .with_generator(BoardGenerator::with_forced_seed(Settings::seed_from_env()));
    session.restart(difficulty, daily);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_input = Instant::now();
    loop {
        render(&session.snapshot());
        if session.state().is_finished() {
            break;
        }
        print!("flip <index>, r = restart, q = quit > ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        session.advance(last_input.elapsed());
        last_input = Instant::now();

        match line.trim() {
            "q" => break,
            "r" => session.restart(session.difficulty(), session.daily_mode()),
            input => match input.parse::<usize>() {
                Ok(index) => session.flip(index),
                Err(_) => println!("not a card index: {}", input),
            },
        }

        if session.state() == SessionState::Resolving {
            render(&session.snapshot());
            std::thread::sleep(config.mismatch_delay);
            session.advance(last_input.elapsed());
            last_input = Instant::now();
        }
    }
    Ok(())
}
