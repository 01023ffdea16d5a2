use std::fmt;

use services::InputEvent;

/// One line typed at the quiz prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Events(Vec<InputEvent>),
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingOption,
    InvalidOption { raw: String, count: usize },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "type a command (`help` lists them)"),
            CommandError::Unknown(cmd) => write!(f, "unknown command: {cmd}"),
            CommandError::MissingOption => write!(f, "answer requires an option number"),
            CommandError::InvalidOption { raw, count } => {
                write!(f, "invalid option {raw:?}; pick 1..={count}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

// Simulated pointer travel, comfortably past the default thresholds.
const SWIPE_START_Y: f64 = 400.0;
const SWIPE_END_Y: f64 = 200.0;
const WHEEL_DELTA: f64 = -120.0;

/// Parse a prompt line. `options` are the current slide's answer labels.
pub fn parse_command(line: &str, options: &[String]) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(CommandError::Empty);
    };

    let events = match head {
        "swipe" | "s" => vec![
            InputEvent::TouchStart { y: SWIPE_START_Y },
            InputEvent::TouchEnd { y: SWIPE_END_Y },
        ],
        "wheel" | "w" => vec![InputEvent::Wheel {
            delta_y: WHEEL_DELTA,
        }],
        "bottom" | "b" => vec![InputEvent::ContentAtBottom(true)],
        "continue" | "c" => vec![InputEvent::ContinueClicked],
        "cta" => vec![InputEvent::CtaClicked],
        "restart" => vec![InputEvent::RestartClicked],
        "answer" | "a" => {
            let raw = parts.next().ok_or(CommandError::MissingOption)?;
            vec![InputEvent::OptionClicked {
                label: option_label(raw, options)?,
            }]
        }
        "help" | "?" => return Ok(Command::Help),
        "quit" | "q" => return Ok(Command::Quit),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Command::Events(events))
}

fn option_label(raw: &str, options: &[String]) -> Result<String, CommandError> {
    // non-question slides have no options; pass through and let the engine reject it
    if options.is_empty() {
        return Ok(raw.to_string());
    }
    raw.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .cloned()
        .ok_or_else(|| CommandError::InvalidOption {
            raw: raw.to_string(),
            count: options.len(),
        })
}

pub fn print_help() {
    println!("commands:");
    println!("  swipe | s        upward swipe");
    println!("  wheel | w        scroll-wheel forward");
    println!("  bottom | b       scrolled to the end of the slide");
    println!("  answer <n> | a   pick option n");
    println!("  continue | c     press the continue button");
    println!("  cta              press the call-to-action button");
    println!("  restart          start over");
    println!("  quit | q");
}
