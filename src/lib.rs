//! This crate provides a single-user task tracker driven by free-form text commands.
//!
//! Each input line is turned into exactly one [`Command`] by the [`parser`] module; parsing
//! never fails, invalid input simply becomes a command that reports a diagnostic. \
//! Executing a command mutates the in-memory [`TaskList`] and rewrites the backing file
//! through [`Storage`] after every successful mutation.
//!
//! The front end that supplies input lines and displays responses is deliberately out of
//! scope: the `tasklog` binary wires stdin/stdout to this pipeline, but any other duplex
//! channel would do.

pub mod error;
pub use error::{Error, Result};

mod task;
pub use task::Task;
pub use task::TaskKind;
mod tasklist;
pub use tasklist::TaskList;

pub mod command;
pub use command::Command;
pub use command::Outcome;
pub mod parser;

pub mod storage;
pub use storage::Storage;
