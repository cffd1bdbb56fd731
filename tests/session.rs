//! End-to-end sessions: raw input lines through the parser and command pipeline,
//! against a real backing file.

use std::fs;
use std::path::PathBuf;

use tasklog::{parser, Outcome, Storage, TaskList};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "tasklog-session-test-{}-{}.txt",
        std::process::id(),
        name
    ))
}

fn run(input: &str, tasks: &mut TaskList, storage: &Storage) -> Outcome {
    parser::parse(input).execute(tasks, storage)
}

#[test]
fn full_session_round_trips_through_the_file() {
    let storage = Storage::new(temp_path("full"));
    let _ = fs::remove_file(storage.path());
    let mut tasks = TaskList::new();

    run("todo read book", &mut tasks, &storage);
    run("deadline finish project /by 2025-12-31", &mut tasks, &storage);
    run(
        "event team meeting /from 2025-09-01 0800 /to 2025-09-01 1200",
        &mut tasks,
        &storage,
    );
    run("mark 1", &mut tasks, &storage);
    run("snooze 2 20h", &mut tasks, &storage);

    assert_eq!(
        fs::read_to_string(storage.path()).unwrap(),
        "T | 1 | read book\n\
         D | 0 | finish project | 2026-01-01\n\
         E | 0 | team meeting | 2025-09-01T08:00 | 2025-09-01T12:00\n"
    );

    // A fresh process sees exactly the same list
    let mut reloaded = TaskList::from_tasks(storage.load().unwrap());
    let outcome = run("list", &mut reloaded, &storage);
    assert_eq!(
        outcome.response,
        "Here are the tasks in your list:\n\
         1.[T][X] read book\n\
         2.[D][ ] finish project (by: 01 Jan 2026)\n\
         3.[E][ ] team meeting (from: 01 Sep 2025 08:00 to: 01 Sep 2025 12:00)"
    );

    let outcome = run("bye", &mut reloaded, &storage);
    assert!(outcome.exit);
}

#[test]
fn deleting_rewrites_the_file_without_the_removed_task() {
    let storage = Storage::new(temp_path("delete"));
    let _ = fs::remove_file(storage.path());
    let mut tasks = TaskList::new();

    run("todo a", &mut tasks, &storage);
    run("todo b", &mut tasks, &storage);
    run("delete 1", &mut tasks, &storage);

    assert_eq!(fs::read_to_string(storage.path()).unwrap(), "T | 0 | b\n");
}

#[test]
fn startup_survives_a_partially_corrupt_file() {
    let storage = Storage::new(temp_path("corrupt"));
    fs::write(
        storage.path(),
        "T | 0 | keep me\ngarbage without separators\nD | 0 | broken | 31-12-2025\n",
    )
    .unwrap();

    let mut tasks = TaskList::from_tasks(storage.load().unwrap());
    assert_eq!(tasks.len(), 1);

    // the next mutation rewrites a clean file
    run("mark 1", &mut tasks, &storage);
    assert_eq!(
        fs::read_to_string(storage.path()).unwrap(),
        "T | 1 | keep me\n"
    );
}

#[test]
fn bad_input_never_stops_the_session() {
    let storage = Storage::new(temp_path("bad-input"));
    let _ = fs::remove_file(storage.path());
    let mut tasks = TaskList::new();

    for input in &[
        "",
        "deadline no date here",
        "mark 99",
        "snooze 1 soon",
        "frobnicate",
    ] {
        let outcome = run(input, &mut tasks, &storage);
        assert!(!outcome.exit, "{:?} must not end the session", input);
        assert!(!outcome.response.is_empty());
    }
    assert!(tasks.is_empty());

    let outcome = run("todo still works", &mut tasks, &storage);
    assert_eq!(tasks.len(), 1);
    assert!(outcome.response.contains("still works"));
}
