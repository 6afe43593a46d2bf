//! Terminal front end for a quiz duel.
//!
//! Runs the session on the main thread and reads stdin on a helper thread,
//! so answers and timer ticks are handled one at a time.

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use quiz_duel::core::{DEFAULT_QUESTIONS_PER_PLAYER, DEFAULT_TOTAL_TIME};
use quiz_duel::{
    GameConfig, GameRng, GameSession, JsonFileSource, PlayerId, QuizResult, SessionEvent, SessionPhase,
    Settings, SystemClock, TICK_INTERVAL,
};

#[derive(Debug, Parser)]
#[command(about = "Two players, one clock, a pile of questions")]
struct Args {
    /// Question file (JSON array of {question, answers, correct})
    #[arg(short, long, default_value = "data/questions.json")]
    questions: PathBuf,
    /// Seconds per round
    #[arg(short, long, default_value_t = DEFAULT_TOTAL_TIME)]
    time: u32,
    /// Questions per player
    #[arg(short = 'n', long, default_value_t = DEFAULT_QUESTIONS_PER_PLAYER)]
    count: usize,
    /// Seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,
}

enum Command {
    Start(PlayerId),
    Answer(usize),
    NewSession,
    Reset,
    Settings(String, String),
    Help,
    Quit,
}

impl Command {
    /// Digits start rounds between rounds and pick answers during one.
    fn parse(line: &str, phase: SessionPhase) -> Option<Self> {
        let mut words = line.split_whitespace();
        let first = words.next()?.to_ascii_lowercase();

        match first.as_str() {
            "q" | "quit" => return Some(Command::Quit),
            "h" | "?" | "help" => return Some(Command::Help),
            "r" | "reset" => return Some(Command::Reset),
            "n" | "new" => return Some(Command::NewSession),
            "s" | "set" => {
                let time = words.next()?.to_string();
                let count = words.next()?.to_string();
                return Some(Command::Settings(time, count));
            }
            _ => {}
        }

        let in_round = matches!(phase, SessionPhase::InRound(_));
        if let Ok(number) = first.parse::<usize>() {
            if in_round {
                return number.checked_sub(1).map(Command::Answer);
            }
            return u8::try_from(number).ok().and_then(PlayerId::from_number).map(Command::Start);
        }

        let mut chars = first.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ 'a'..='z'), None) if in_round => Some(Command::Answer(c as usize - 'a' as usize)),
            _ => None,
        }
    }
}

/// Remembers what was last printed so ticks only print on change.
#[derive(Default)]
struct Screen {
    last_tick: Option<u32>,
}

impl Screen {
    fn render(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::SessionStarted { money_chosen, config } => {
                    println!(
                        "\n=== New session: €{money_chosen} per second left, {}s per round, {} questions each ===",
                        config.total_time_seconds, config.questions_per_player
                    );
                    println!("Type 1 to start Player 1.");
                }
                SessionEvent::RoundStarted { player, remaining } => {
                    self.last_tick = Some(remaining);
                    println!("\n--- {player}: go! {remaining}s on the clock ---");
                }
                SessionEvent::Tick { player, remaining } => {
                    if self.last_tick != Some(remaining) && (remaining % 10 == 0 || remaining <= 5) {
                        println!("  [{player}] {remaining}s left");
                    }
                    self.last_tick = Some(remaining);
                }
                SessionEvent::QuestionShown {
                    number,
                    total,
                    text,
                    answers,
                    ..
                } => {
                    println!("\nQ{number}/{total}: {text}");
                    for (i, answer) in answers.iter().enumerate() {
                        println!("  {}) {answer}", answer_label(i, answers.len()));
                    }
                }
                SessionEvent::AnswerScored { correct, score, .. } => {
                    let verdict = if correct { "Correct!" } else { "Wrong." };
                    println!("  {verdict} Score: {score}");
                }
                SessionEvent::RoundEnded { player, message, .. } => {
                    match message {
                        Some(message) => println!("\n{message}"),
                        None => println!("\n{player} is done."),
                    }
                    if player == PlayerId::ONE {
                        println!("Type 2 to start Player 2.");
                    }
                }
                SessionEvent::SessionFinished(report) => {
                    println!("\n*** {} ***", report.message);
                    println!("Type n for a new session, r to reset, q to quit.");
                }
            }
        }
    }
}

/// Letters while they last, 1-based numbers for longer answer lists.
fn answer_label(index: usize, count: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if count <= 26 => char::from(b'a' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  1 / 2            start Player 1 / Player 2");
    println!("  a-z or a number  answer the current question");
    println!("  s <secs> <count> change settings and reset");
    println!("  n                new session (when offered)");
    println!("  r                reset the session");
    println!("  q                quit");
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn run(args: Args) -> QuizResult<()> {
    let mut settings = Settings::default();
    settings.apply(GameConfig {
        total_time_seconds: args.time,
        questions_per_player: args.count,
    })?;

    let rng = args.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    let mut session = GameSession::new(settings.current(), SystemClock::new(), rng)?;
    session.load_questions(&JsonFileSource::new(&args.questions))?;

    print_help();
    let input = spawn_stdin_reader();
    let mut screen = Screen::default();

    loop {
        screen.render(session.drain_events());

        let line = match input.recv_timeout(TICK_INTERVAL) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => {
                session.tick();
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let Some(command) = Command::parse(&line, session.phase()) else {
            if !line.trim().is_empty() {
                println!("? unknown command, type h for help");
            }
            continue;
        };

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                print_help();
                Ok(())
            }
            Command::Start(player) => session.start_round(player),
            Command::Answer(index) => session.submit_answer(index).map(|_| ()),
            Command::NewSession => session.new_session(),
            Command::Reset => session.reset_session(settings.current()),
            Command::Settings(time, count) => session.apply_settings(&mut settings, &time, &count).map(|_| ()),
        };

        if let Err(e) = result {
            println!("! {e}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "quiz-duel stopped");
            eprintln!("error: {e}");
            let mut cause = std::error::Error::source(&e);
            while let Some(inner) = cause {
                eprintln!("  caused by: {inner}");
                cause = inner.source();
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_labels() {
        assert_eq!(answer_label(0, 4), "a");
        assert_eq!(answer_label(25, 26), "z");
        assert_eq!(answer_label(0, 27), "1");
        assert_eq!(answer_label(26, 27), "27");
        assert_eq!(answer_label(300, 400), "301");
    }

    #[test]
    fn test_parse_digits_depend_on_phase() {
        let waiting = SessionPhase::AwaitingRound(PlayerId::ONE);
        let playing = SessionPhase::InRound(PlayerId::ONE);

        assert!(matches!(Command::parse("2", waiting), Some(Command::Start(PlayerId::TWO))));
        assert!(matches!(Command::parse("2", playing), Some(Command::Answer(1))));
        assert!(matches!(Command::parse("27", playing), Some(Command::Answer(26))));
        assert!(matches!(Command::parse("c", playing), Some(Command::Answer(2))));
        assert!(Command::parse("c", waiting).is_none());
        assert!(Command::parse("0", playing).is_none());
    }

    #[test]
    fn test_parse_settings_needs_both_values() {
        let phase = SessionPhase::Finished;
        assert!(matches!(
            Command::parse("s 30 4", phase),
            Some(Command::Settings(ref t, ref c)) if t == "30" && c == "4"
        ));
        assert!(Command::parse("s 30", phase).is_none());
    }
}
