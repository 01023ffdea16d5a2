use std::fmt;
use std::path::PathBuf;

use log::{debug, info};
use services::{
    Clock, EnginePorts, InputEvent, NavigationEngine, NavigationOutcome, QuizDefinition,
    QuizLoopService, TokioTimer,
};
use storage::repository::Storage;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

mod commands;
mod terminal;

use commands::{Command, parse_command, print_help};
use terminal::{TerminalPresentation, TerminalRewards};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingQuiz,
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingQuiz => write!(f, "no quiz file given (use --quiz or QUIZ_FILE)"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- --quiz <file.json> [--db <sqlite_url>] [--no-store]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:quiz.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE, QUIZ_DB_URL, RUST_LOG");
}

/// Environment fallbacks, read once in `run`.
#[derive(Debug, Default)]
struct Env {
    quiz_file: Option<String>,
    db_url: Option<String>,
}

impl Env {
    fn from_process() -> Self {
        Self {
            quiz_file: std::env::var("QUIZ_FILE").ok(),
            db_url: std::env::var("QUIZ_DB_URL").ok(),
        }
    }
}

#[derive(Debug)]
struct Args {
    quiz: PathBuf,
    /// `None` when persistence is turned off.
    db_url: Option<String>,
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>, env: Env) -> Result<Parsed, ArgsError> {
        let mut quiz = env.quiz_file.map(PathBuf::from);
        let mut db_url = Some(
            env.db_url
                .map_or_else(|| "sqlite://quiz.sqlite3".into(), normalize_sqlite_url),
        );

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--quiz" => quiz = Some(PathBuf::from(require_value(args, "--quiz")?)),
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = Some(normalize_sqlite_url(value));
                }
                "--no-store" => db_url = None,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let quiz = quiz.ok_or(ArgsError::MissingQuiz)?;
        Ok(Parsed::Run(Self { quiz, db_url }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

type Input = Lines<BufReader<Stdin>>;

/// Ask a yes/no question on the prompt; an empty answer picks `default`.
async fn confirm(input: &mut Input, question: &str, default: bool) -> std::io::Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    println!("{question} {hint}");
    let Some(line) = input.next_line().await? else {
        return Ok(default);
    };
    Ok(match line.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}

fn report(outcome: &NavigationOutcome) {
    match outcome {
        NavigationOutcome::Completed(summary) => {
            println!(
                "answered {} of {} questions in {:.0}s",
                summary.responses.len(),
                summary.question_count,
                summary.total_secs
            );
            for response in &summary.responses {
                println!(
                    "  {}: {} ({:.1}s)",
                    response.question_text, response.selected_option, response.time_spent_secs
                );
            }
        }
        NavigationOutcome::ExternalRedirect { url: Some(url) } => {
            println!("opening {url}");
        }
        NavigationOutcome::ExternalRedirect { url: None } => {
            println!("no offer is configured for this quiz");
        }
        NavigationOutcome::Blocked(reason) => println!("(can't move on: {reason:?})"),
        other => debug!("outcome: {other:?}"),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = match Args::parse(&mut argv, Env::from_process()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    let (registry, settings) = QuizDefinition::load(&args.quiz)?.build()?;
    info!(
        "loaded {} ({} slides)",
        args.quiz.display(),
        registry.slide_count()
    );

    let service = match args.db_url.as_deref() {
        Some(db_url) => {
            // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
            prepare_sqlite_file(db_url)?;
            let storage = Storage::sqlite(db_url).await?;
            QuizLoopService::new(storage.progress)
        }
        None => QuizLoopService::without_persistence(),
    };

    let (timer, mut fired) = TokioTimer::channel();
    let presentation = TerminalPresentation::new(&registry);
    let ports = EnginePorts::new(presentation, timer).with_rewards(TerminalRewards);
    let mut engine = NavigationEngine::new(registry, settings, Clock::default(), ports);
    let leave_guard = engine.leave_guard();

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let mut resumed = false;
    if let Some(record) = service.saved_progress().await {
        let question = format!(
            "Resume your quiz at slide {} ({} answered)?",
            record.current_index + 1,
            record.responses.len()
        );
        if confirm(&mut input, &question, true).await? {
            match service.resume(&mut engine, record).await {
                Ok(outcome) => {
                    resumed = true;
                    report(&outcome);
                }
                Err(err) => eprintln!("saved progress does not fit this quiz: {err}"),
            }
        }
    }
    if !resumed {
        service.start(&mut engine).await;
    }
    println!("type `help` for commands");

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line, engine.current_slide().options()) {
                    Ok(Command::Events(events)) => {
                        for event in events {
                            let outcome = service.dispatch(&mut engine, event).await;
                            report(&outcome);
                        }
                    }
                    Ok(Command::Help) => print_help(),
                    Ok(Command::Quit) => {
                        let leaving = !leave_guard.should_confirm_leave()
                            || engine.is_complete()
                            || confirm(&mut input, "Leave the quiz? Your answers are kept.", false).await?;
                        if leaving {
                            break;
                        }
                    }
                    Err(err) => eprintln!("{err}"),
                }
            }
            Some(token) = fired.recv() => {
                let outcome = service.dispatch(&mut engine, InputEvent::TimerFired(token)).await;
                report(&outcome);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
