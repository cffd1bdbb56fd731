//! Turning raw input lines into commands
//!
//! The parser is total: every input maps to some [`Command`]. Invalid input becomes
//! [`Command::Unknown`] carrying a diagnostic, so callers never special-case a parse
//! failure; failure is simply a command whose execution reports a message.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::command::Command;
use crate::error::{Error, Result};

/// Input encoding of a deadline date (e.g. `2025-12-31`)
const INPUT_DATE: &str = "%Y-%m-%d";
/// Input encoding of an event date-time (e.g. `2025-12-31 1400`)
const INPUT_DATETIME: &str = "%Y-%m-%d %H%M";

/// A snooze duration token: an integer followed by a unit (days, hours or minutes)
static DURATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)([dhm])$").unwrap());

/// Parse one line of user input into exactly one command
pub fn parse(input: &str) -> Command {
    match try_parse(input) {
        Ok(command) => command,
        Err(err) => Command::Unknown {
            message: err.to_string(),
        },
    }
}

fn try_parse(input: &str) -> Result<Command> {
    // Collapse repeated whitespace while splitting off the instruction token
    let mut tokens = input.split_whitespace();
    let instruction = match tokens.next() {
        Some(word) => word.to_lowercase(),
        None => return Err(Error::Parse("Input cannot be empty!".to_string())),
    };
    let contents = tokens.collect::<Vec<&str>>().join(" ");

    if !instruction.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::Parse(
            "Commands can only contain letters!".to_string(),
        ));
    }

    match instruction.as_str() {
        "todo" => parse_todo(&contents),
        "deadline" => parse_deadline(&contents),
        "event" => parse_event(&contents),
        "mark" | "unmark" | "delete" => parse_index_command(&instruction, &contents),
        "snooze" => parse_snooze(&contents),
        "find" => parse_find(&contents),
        "list" => parse_bare(&instruction, &contents, Command::List),
        "bye" => parse_bare(&instruction, &contents, Command::Bye),
        other => Err(Error::Parse(format!("Unknown command '{}'!", other))),
    }
}

fn parse_todo(contents: &str) -> Result<Command> {
    if contents.is_empty() {
        return Err(Error::Parse(
            "The todo command requires a description!".to_string(),
        ));
    }
    Ok(Command::AddTodo {
        description: contents.to_string(),
    })
}

fn parse_deadline(contents: &str) -> Result<Command> {
    let (description, due) = contents.split_once("/by").ok_or_else(|| {
        Error::Parse(
            "The deadline command is missing '/by'! Format: deadline <description> /by <date>"
                .to_string(),
        )
    })?;
    let description = description.trim();
    let due = due.trim();

    if description.is_empty() {
        return Err(Error::Parse(
            "A deadline task cannot have an empty description!".to_string(),
        ));
    }
    if due.is_empty() {
        return Err(Error::Parse(
            "A deadline task must have a due date!".to_string(),
        ));
    }
    let due = NaiveDate::parse_from_str(due, INPUT_DATE).map_err(|_| {
        Error::Parse("Invalid date. Use yyyy-MM-dd (e.g. 2025-11-27)!".to_string())
    })?;

    Ok(Command::AddDeadline {
        description: description.to_string(),
        due,
    })
}

fn parse_event(contents: &str) -> Result<Command> {
    let (description, times) = contents.split_once("/from").ok_or_else(|| {
        Error::Parse("The event command is missing '/from'!".to_string())
    })?;
    // Requiring '/to' after the '/from' split also enforces the marker order
    let (start, end) = times.split_once("/to").ok_or_else(|| {
        Error::Parse("The event command is missing '/to'!".to_string())
    })?;
    let description = description.trim();
    let start = start.trim();
    let end = end.trim();

    if description.is_empty() {
        return Err(Error::Parse(
            "An event task cannot have an empty description!".to_string(),
        ));
    }
    if start.is_empty() || end.is_empty() {
        return Err(Error::Parse(
            "An event's times cannot be empty!".to_string(),
        ));
    }
    let parse_datetime = |text: &str| {
        NaiveDateTime::parse_from_str(text, INPUT_DATETIME).map_err(|_| {
            Error::Parse("Invalid date-time. Use yyyy-MM-dd HHmm (e.g. 2025-11-27 1800)!".to_string())
        })
    };

    Ok(Command::AddEvent {
        description: description.to_string(),
        start: parse_datetime(start)?,
        end: parse_datetime(end)?,
    })
}

fn parse_index_command(instruction: &str, contents: &str) -> Result<Command> {
    if contents.is_empty() {
        return Err(Error::Parse(format!(
            "The {} command requires a task index!",
            instruction
        )));
    }
    if contents.contains(' ') {
        return Err(Error::Parse(format!(
            "The {} command takes a single task index!",
            instruction
        )));
    }
    let index = parse_index(contents)?;

    Ok(match instruction {
        "mark" => Command::Mark { index },
        "unmark" => Command::Unmark { index },
        _ => Command::Delete { index },
    })
}

fn parse_snooze(contents: &str) -> Result<Command> {
    let parts: Vec<&str> = contents.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(Error::Parse(
            "Snooze format: snooze <index> <duration>".to_string(),
        ));
    }
    let index = parse_index(parts[0])?;
    let delta = parse_duration(parts[1])?;

    Ok(Command::Snooze { index, delta })
}

fn parse_find(contents: &str) -> Result<Command> {
    if contents.is_empty() {
        return Err(Error::Parse(
            "The find command requires a search keyword!".to_string(),
        ));
    }
    Ok(Command::Find {
        keyword: contents.to_string(),
    })
}

fn parse_bare(instruction: &str, contents: &str, command: Command) -> Result<Command> {
    if !contents.is_empty() {
        return Err(Error::Parse(format!(
            "The {} command does not take any parameters!",
            instruction
        )));
    }
    Ok(command)
}

/// Parse a user-facing 1-based index into the internal 0-based one
fn parse_index(token: &str) -> Result<usize> {
    let position: usize = token.parse().map_err(|_| {
        Error::Parse(format!("Task index must be a number, not '{}'!", token))
    })?;
    if position == 0 {
        return Err(Error::Parse("Task index must be positive!".to_string()));
    }
    Ok(position - 1)
}

fn parse_duration(token: &str) -> Result<Duration> {
    let captures = DURATION_RE.captures(token).ok_or_else(|| {
        Error::Parse("Invalid duration. Use <number><d|h|m> (e.g. 3d, 5h or 30m)!".to_string())
    })?;
    // The regex guarantees digits; only overflow can make this fail
    let amount: i64 = captures[1]
        .parse()
        .map_err(|_| Error::Parse(format!("Duration '{}' is too large!", token)))?;
    if amount > 100_000 {
        return Err(Error::Parse(format!("Duration '{}' is too large!", token)));
    }

    Ok(match &captures[2] {
        "d" => Duration::days(amount),
        "h" => Duration::hours(amount),
        _ => Duration::minutes(amount),
    })
}
