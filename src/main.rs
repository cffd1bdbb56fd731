//! Interactive front end: reads lines from stdin, feeds them through the parser and
//! command pipeline, and prints each response until a `bye` command (or EOF).

use std::io::BufRead;

use tasklog::{parser, Storage, TaskList};

const DEFAULT_STORAGE_PATH: &str = "data/tasks.txt";
const RULE: &str = "____________________________________________________________";

fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string());
    let storage = Storage::new(path);

    // A broken backing file must not prevent startup
    let loaded = match storage.load() {
        Ok(tasks) => tasks,
        Err(err) => {
            log::warn!("Could not load saved tasks, starting empty: {}", err);
            Vec::new()
        }
    };
    let mut tasks = TaskList::from_tasks(loaded);

    print_framed("Hello! I'm Tasklog\nWhat can I do for you?");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::warn!("Could not read input: {}", err);
                break;
            }
        };

        let outcome = parser::parse(&line).execute(&mut tasks, &storage);
        print_framed(&outcome.response);
        if outcome.exit {
            break;
        }
    }
}

fn print_framed(text: &str) {
    println!("{}", RULE);
    println!("{}", text);
    println!("{}", RULE);
}
