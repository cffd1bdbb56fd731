//! Flat-file persistence for the task list
//!
//! One record per line, pipe-delimited, in list order. The whole file is rewritten on
//! every save; loading tolerates individual corrupt lines by skipping them with a
//! warning instead of aborting.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::task::Task;
use crate::tasklist::TaskList;

/// A persistence handle bound to one backing file
#[derive(Debug)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Create a handle for the given backing file. Nothing is touched on disk yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every well-formed record from the backing file.
    ///
    /// A missing or empty file yields an empty vec. Blank lines are ignored, and any
    /// line that fails to parse is skipped with a warning so one corrupt record cannot
    /// take the rest of the data down with it.
    pub fn load(&self) -> Result<Vec<Task>> {
        self.create_parent_dir()?;
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut tasks = Vec::new();
        for (line_number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Task::from_record(line) {
                Ok(task) => tasks.push(task),
                Err(err) => log::warn!(
                    "Skipping corrupt record at {}:{}: {}",
                    self.path.display(),
                    line_number + 1,
                    err
                ),
            }
        }
        log::debug!("Loaded {} tasks from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    /// Rewrite the whole backing file from the in-memory list, one record per line
    pub fn save(&self, tasks: &TaskList) -> Result<()> {
        self.create_parent_dir()?;
        let mut content = String::new();
        for task in tasks.iter() {
            content.push_str(&task.to_record());
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn create_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
