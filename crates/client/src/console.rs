//! Line-oriented console driving a [`RuntimeHandle`].
//!
//! Each stdin line is one command. Runtime events are printed as JSON lines
//! as they arrive, independent of the command loop.
use std::time::Duration;

use anyhow::Result;
use funeral_core::Direction;
use funeral_runtime::{RuntimeError, RuntimeHandle, Topic};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinSet;

const HELP: &str = "\
commands:
  press <up|down|left|right>       start holding a movement key
  release <up|down|left|right>     stop holding it
  walk <direction> [ms]            hold a key for a while (default 250 ms)
  interact | e                     use whatever is in reach
  close                            close the open panel
  submit <name> | <cause>          apply for a funeral
  snapshot | s                     print the current state
  help | ?                         this text
  quit | q                         leave the chapel";

const DEFAULT_WALK: Duration = Duration::from_millis(250);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Press(Direction),
    Release(Direction),
    Walk {
        direction: Direction,
        duration: Duration,
    },
    Interact,
    Close,
    Submit {
        name: String,
        cause: String,
    },
    Snapshot,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a direction")]
    InvalidDirection(String),

    #[error("`{0}` is not a duration in milliseconds")]
    InvalidDuration(String),

    #[error("use `submit <name> | <cause>`")]
    MalformedSubmission,
}

impl ConsoleCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "" => return Ok(None),
            "press" => Self::Press(direction_arg("press", rest)?),
            "release" => Self::Release(direction_arg("release", rest)?),
            "walk" => {
                let mut args = rest.split_whitespace();
                let direction = direction_arg("walk", args.next().unwrap_or_default())?;
                let duration = match args.next() {
                    Some(ms) => ms
                        .parse()
                        .map(Duration::from_millis)
                        .map_err(|_| ParseError::InvalidDuration(ms.to_string()))?,
                    None => DEFAULT_WALK,
                };
                Self::Walk {
                    direction,
                    duration,
                }
            }
            "interact" | "e" => Self::Interact,
            "close" => Self::Close,
            "submit" => {
                let (name, cause) = rest
                    .split_once('|')
                    .ok_or(ParseError::MalformedSubmission)?;
                Self::Submit {
                    name: name.trim().to_string(),
                    cause: cause.trim().to_string(),
                }
            }
            "snapshot" | "s" => Self::Snapshot,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn direction_arg(verb: &'static str, arg: &str) -> Result<Direction, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(verb));
    }
    arg.parse()
        .map_err(|_| ParseError::InvalidDirection(arg.to_string()))
}

/// Runs until `quit`, end of input or Ctrl-C.
pub async fn run(handle: RuntimeHandle) -> Result<()> {
    let mut printers = JoinSet::new();
    for (topic, rx) in handle.subscribe_multiple(&Topic::ALL) {
        printers.spawn(print_events(topic, rx));
    }

    println!("Welcome to the chapel. Type `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        };
        let Some(line) = line else { break };

        let command = match ConsoleCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                println!("{error}");
                continue;
            }
        };
        if command == ConsoleCommand::Quit {
            break;
        }

        match execute(&handle, command).await {
            Ok(()) => {}
            Err(RuntimeError::InvalidSubmission(error)) => println!("rejected: {error}"),
            Err(error) => return Err(error.into()),
        }
    }

    printers.shutdown().await;
    Ok(())
}

async fn execute(handle: &RuntimeHandle, command: ConsoleCommand) -> funeral_runtime::Result<()> {
    match command {
        ConsoleCommand::Press(direction) => handle.press(direction).await?,
        ConsoleCommand::Release(direction) => handle.release(direction).await?,
        ConsoleCommand::Walk {
            direction,
            duration,
        } => {
            handle.press(direction).await?;
            tokio::time::sleep(duration).await;
            handle.release(direction).await?;
        }
        ConsoleCommand::Interact => {
            let outcome = handle.interact().await?;
            print_json("interaction", &outcome);
        }
        ConsoleCommand::Close => {
            if !handle.close_modal().await? {
                println!("nothing to close");
            }
        }
        ConsoleCommand::Submit { name, cause } => {
            let id = handle.submit_funeral(name, cause).await?;
            println!("application accepted as record {id}");
        }
        ConsoleCommand::Snapshot => {
            let snapshot = handle.snapshot().await?;
            print_json("snapshot", &snapshot);
        }
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Quit => {}
    }
    Ok(())
}

async fn print_events(topic: Topic, mut rx: broadcast::Receiver<funeral_runtime::Event>) {
    loop {
        match rx.recv().await {
            Ok(event) => print_json("event", &event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(?topic, skipped, "console fell behind the event stream");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn print_json(label: &str, value: &impl serde::Serialize) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{label}: {json}"),
        Err(error) => tracing::error!(%error, "failed to serialize {label}"),
    }
}
