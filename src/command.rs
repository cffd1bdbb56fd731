//! Command variants and their execution
//!
//! One variant per verb, built once by the parser and executed once. Execution performs
//! at most one logical effect on the list, persists after every successful mutation, and
//! always comes back with a response string for the caller to display.

use std::fmt::Write;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::Task;
use crate::tasklist::TaskList;

/// One parsed user request
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    AddTodo {
        description: String,
    },
    AddDeadline {
        description: String,
        due: NaiveDate,
    },
    AddEvent {
        description: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Mark {
        index: usize,
    },
    Unmark {
        index: usize,
    },
    Delete {
        index: usize,
    },
    List,
    Find {
        keyword: String,
    },
    Snooze {
        index: usize,
        delta: Duration,
    },
    Bye,
    /// Input that did not parse; executing it reports the carried diagnostic
    Unknown {
        message: String,
    },
}

/// What a command execution produced: the response to display, and whether the caller
/// should stop reading input
#[derive(Debug, PartialEq)]
pub struct Outcome {
    pub response: String,
    pub exit: bool,
}

impl Command {
    /// Execute this command against the task list and persistence handle.
    ///
    /// Parse and validation failures never escape: they are rendered into the response,
    /// so the interactive loop always continues. A failed save is reported the same way,
    /// but the in-memory mutation it followed is kept.
    pub fn execute(&self, tasks: &mut TaskList, storage: &Storage) -> Outcome {
        let exit = matches!(self, Command::Bye);
        let response = match self.run(tasks, storage) {
            Ok(response) => response,
            Err(err) => err.to_string(),
        };
        Outcome { response, exit }
    }

    fn run(&self, tasks: &mut TaskList, storage: &Storage) -> Result<String> {
        match self {
            Command::AddTodo { description } => {
                add_task(tasks, storage, Task::todo(description.clone()))
            }
            Command::AddDeadline { description, due } => {
                add_task(tasks, storage, Task::deadline(description.clone(), *due))
            }
            Command::AddEvent {
                description,
                start,
                end,
            } => add_task(
                tasks,
                storage,
                Task::event(description.clone(), *start, *end),
            ),
            Command::Mark { index } => {
                let task = checked_task_mut(tasks, *index, "mark")?;
                task.mark_done();
                let rendered = task.to_string();
                storage.save(tasks)?;
                Ok(format!("Nice! I've marked this task as done:\n{}", rendered))
            }
            Command::Unmark { index } => {
                let task = checked_task_mut(tasks, *index, "unmark")?;
                task.mark_undone();
                let rendered = task.to_string();
                storage.save(tasks)?;
                Ok(format!(
                    "OK, I've marked this task as not done yet:\n{}",
                    rendered
                ))
            }
            Command::Delete { index } => {
                check_index(tasks.len(), *index, "delete")?;
                let removed = tasks.delete(*index);
                storage.save(tasks)?;
                Ok(format!(
                    "Ok! I've removed this task:\n{}\nNow you have {} tasks in the list.",
                    removed,
                    tasks.len()
                ))
            }
            Command::Snooze { index, delta } => {
                let task = checked_task_mut(tasks, *index, "snooze")?;
                if task.is_done() {
                    return Err(Error::Validation(
                        "Cannot snooze a completed task! Unmark it first if needed.".to_string(),
                    ));
                }
                task.snooze(*delta)?;
                let rendered = task.to_string();
                storage.save(tasks)?;
                Ok(format!("OK, I've snoozed this task:\n{}", rendered))
            }
            Command::List => {
                if tasks.is_empty() {
                    return Err(Error::Validation(
                        "There are no tasks in your list yet!".to_string(),
                    ));
                }
                let mut out = String::from("Here are the tasks in your list:");
                for (i, task) in tasks.iter().enumerate() {
                    let _ = write!(out, "\n{}.{}", i + 1, task);
                }
                Ok(out)
            }
            Command::Find { keyword } => {
                let matches = tasks.find(keyword);
                if matches.is_empty() {
                    return Err(Error::Validation(format!(
                        "No tasks matching '{}' were found!",
                        keyword
                    )));
                }
                let mut out = String::from("Here are the matching tasks in your list:");
                for (position, task) in matches {
                    // original position in the full list, not renumbered
                    let _ = write!(out, "\n{}.{}", position + 1, task);
                }
                Ok(out)
            }
            Command::Bye => Ok("Bye. Hope to see you again soon!".to_string()),
            Command::Unknown { message } => Ok(message.clone()),
        }
    }
}

fn add_task(tasks: &mut TaskList, storage: &Storage, task: Task) -> Result<String> {
    let rendered = task.to_string();
    tasks.add(task);
    storage.save(tasks)?;
    Ok(format!(
        "Ok! I've added this task:\n{}\nNow you have {} tasks in the list.",
        rendered,
        tasks.len()
    ))
}

/// Strict bounds check: valid indices are `0 <= index < len`
fn check_index(len: usize, index: usize, verb: &str) -> Result<()> {
    if len == 0 {
        return Err(Error::Validation(format!(
            "There are no tasks to {}!",
            verb
        )));
    }
    if index >= len {
        return Err(Error::Validation(format!(
            "Task index {} is out of range! Valid indices are [1, {}].",
            index + 1,
            len
        )));
    }
    Ok(())
}

fn checked_task_mut<'a>(
    tasks: &'a mut TaskList,
    index: usize,
    verb: &str,
) -> Result<&'a mut Task> {
    check_index(tasks.len(), index, verb)?;
    tasks
        .get_mut(index)
        .ok_or_else(|| Error::Validation(format!("There are no tasks to {}!", verb)))
}
