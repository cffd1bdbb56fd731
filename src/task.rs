//! Tasks and their three kinds (plain, due-dated, time-ranged)

use std::fmt::{Display, Formatter};

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Storage encoding of a calendar date (e.g. `2025-12-31`)
pub const STORAGE_DATE: &str = "%Y-%m-%d";
/// Storage encoding of a date-time (e.g. `2025-12-31T14:00`)
pub const STORAGE_DATETIME: &str = "%Y-%m-%dT%H:%M";

// Presentation-only formats. Storage never uses these, so they can change freely
// without breaking saved files.
const PRETTY_DATE: &str = "%d %b %Y";
const PRETTY_DATETIME: &str = "%d %b %Y %H:%M";

/// What kind of task this is, along with the date payload that kind carries
#[derive(Clone, Debug, PartialEq)]
pub enum TaskKind {
    /// A plain to-do, with no date attached
    Todo,
    /// A task with a due date
    Deadline { due: NaiveDate },
    /// A task spanning a start and end date-time.
    /// No ordering between the two is enforced.
    Event {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// A single task.
///
/// The description and completion flag are private: the description is immutable after
/// creation, and the flag only changes through [`Task::mark_done`], [`Task::mark_undone`]
/// or [`Task::snooze`].
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    /// Create a plain task
    pub fn todo(description: String) -> Self {
        Self {
            description,
            done: false,
            kind: TaskKind::Todo,
        }
    }

    /// Create a due-dated task
    pub fn deadline(description: String, due: NaiveDate) -> Self {
        Self {
            description,
            done: false,
            kind: TaskKind::Deadline { due },
        }
    }

    /// Create a time-ranged task
    pub fn event(description: String, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            description,
            done: false,
            kind: TaskKind::Event { start, end },
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn is_done(&self) -> bool {
        self.done
    }
    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    fn status_icon(&self) -> char {
        if self.done {
            'X'
        } else {
            ' '
        }
    }

    /// Postpone this task's date(s) by `delta`.
    ///
    /// * Plain tasks cannot be snoozed.
    /// * Due-dated tasks move by whole days: the delta is converted to hours, and any
    ///   non-zero remainder below a full day rounds **up** one additional day.
    /// * Time-ranged tasks shift start and end by the exact delta, so the interval
    ///   length is preserved.
    pub fn snooze(&mut self, delta: Duration) -> Result<()> {
        match &mut self.kind {
            TaskKind::Todo => Err(Error::Validation(
                "Cannot snooze a dateless task!".to_string(),
            )),
            TaskKind::Deadline { due } => {
                let hours = delta.num_hours();
                let mut days = hours / 24;
                if hours % 24 > 0 {
                    days += 1;
                }
                *due += Duration::days(days);
                Ok(())
            }
            TaskKind::Event { start, end } => {
                *start += delta;
                *end += delta;
                Ok(())
            }
        }
    }

    /// Serialize this task into one pipe-delimited storage line
    pub fn to_record(&self) -> String {
        let status = if self.done { 1 } else { 0 };
        match &self.kind {
            TaskKind::Todo => format!("T | {} | {}", status, self.description),
            TaskKind::Deadline { due } => format!(
                "D | {} | {} | {}",
                status,
                self.description,
                due.format(STORAGE_DATE)
            ),
            TaskKind::Event { start, end } => format!(
                "E | {} | {} | {} | {}",
                status,
                self.description,
                start.format(STORAGE_DATETIME),
                end.format(STORAGE_DATETIME)
            ),
        }
    }

    /// Parse a storage line back into a task.
    ///
    /// Whitespace around the `|` separators is ignored. Lines with too few fields, an
    /// unknown type tag or an unparseable date are rejected.
    pub fn from_record(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        if fields.len() < 3 {
            return Err(Error::Parse(format!("not enough fields in '{}'", line)));
        }

        let done = match fields[1] {
            "1" => true,
            "0" => false,
            other => return Err(Error::Parse(format!("bad status field '{}'", other))),
        };
        let description = fields[2].to_string();
        if description.is_empty() {
            return Err(Error::Parse(format!("empty description in '{}'", line)));
        }

        let mut task = match fields[0] {
            "T" => Task::todo(description),
            "D" => {
                let due_str = fields
                    .get(3)
                    .ok_or_else(|| Error::Parse(format!("missing due date in '{}'", line)))?;
                let due = NaiveDate::parse_from_str(due_str, STORAGE_DATE)
                    .map_err(|err| Error::Parse(format!("bad due date '{}': {}", due_str, err)))?;
                Task::deadline(description, due)
            }
            "E" => {
                if fields.len() < 5 {
                    return Err(Error::Parse(format!("not enough fields in '{}'", line)));
                }
                let start = NaiveDateTime::parse_from_str(fields[3], STORAGE_DATETIME)
                    .map_err(|err| Error::Parse(format!("bad start '{}': {}", fields[3], err)))?;
                let end = NaiveDateTime::parse_from_str(fields[4], STORAGE_DATETIME)
                    .map_err(|err| Error::Parse(format!("bad end '{}': {}", fields[4], err)))?;
                Task::event(description, start, end)
            }
            other => {
                return Err(Error::Parse(format!("unknown task type tag '{}'", other)));
            }
        };

        if done {
            task.mark_done();
        }
        Ok(task)
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TaskKind::Todo => {
                write!(f, "[T][{}] {}", self.status_icon(), self.description)
            }
            TaskKind::Deadline { due } => write!(
                f,
                "[D][{}] {} (by: {})",
                self.status_icon(),
                self.description,
                due.format(PRETTY_DATE)
            ),
            TaskKind::Event { start, end } => write!(
                f,
                "[E][{}] {} (from: {} to: {})",
                self.status_icon(),
                self.description,
                start.format(PRETTY_DATETIME),
                end.format(PRETTY_DATETIME)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, STORAGE_DATE).unwrap()
    }
    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, STORAGE_DATETIME).unwrap()
    }

    #[test]
    fn todo_render_and_record() {
        let task = Task::todo("read book".to_string());
        assert_eq!(task.to_string(), "[T][ ] read book");
        assert_eq!(task.to_record(), "T | 0 | read book");
    }

    #[test]
    fn deadline_render_and_record() {
        let mut task = Task::deadline("pay rent".to_string(), date("2025-01-01"));
        task.mark_done();
        assert_eq!(task.to_string(), "[D][X] pay rent (by: 01 Jan 2025)");
        assert_eq!(task.to_record(), "D | 1 | pay rent | 2025-01-01");
    }

    #[test]
    fn event_render_and_record() {
        let task = Task::event(
            "team meeting".to_string(),
            datetime("2025-12-31T14:00"),
            datetime("2025-12-31T15:00"),
        );
        assert_eq!(
            task.to_string(),
            "[E][ ] team meeting (from: 31 Dec 2025 14:00 to: 31 Dec 2025 15:00)"
        );
        assert_eq!(
            task.to_record(),
            "E | 0 | team meeting | 2025-12-31T14:00 | 2025-12-31T15:00"
        );
    }

    #[test]
    fn records_round_trip_for_all_kinds() {
        let mut event = Task::event(
            "standup".to_string(),
            datetime("2025-09-01T08:00"),
            datetime("2025-09-01T12:00"),
        );
        event.mark_done();
        let originals = vec![
            Task::todo("read book".to_string()),
            Task::deadline("finish project".to_string(), date("2025-12-31")),
            event,
        ];
        for original in originals {
            let reparsed = Task::from_record(&original.to_record()).unwrap();
            assert_eq!(reparsed, original);
        }
    }

    #[test]
    fn from_record_rejects_garbage() {
        assert!(Task::from_record("T | 0").is_err());
        assert!(Task::from_record("Z | 0 | mystery").is_err());
        assert!(Task::from_record("D | 0 | pay rent | not-a-date").is_err());
        assert!(Task::from_record("E | 0 | meeting | 2025-12-31T14:00").is_err());
        assert!(Task::from_record("T | 2 | read book").is_err());
    }

    #[test]
    fn mark_then_unmark_restores_status() {
        let mut task = Task::todo("laundry".to_string());
        assert!(!task.is_done());
        task.mark_done();
        task.mark_undone();
        assert!(!task.is_done());
        task.mark_undone();
        task.mark_done();
        assert!(task.is_done());
    }

    #[test]
    fn snooze_todo_fails() {
        let mut task = Task::todo("laundry".to_string());
        assert!(matches!(
            task.snooze(Duration::days(1)),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn snooze_deadline_rounds_partial_days_up() {
        let mut task = Task::deadline("pay rent".to_string(), date("2025-01-01"));
        task.snooze(Duration::hours(20)).unwrap();
        assert_eq!(
            task.kind(),
            &TaskKind::Deadline { due: date("2025-01-02") }
        );
    }

    #[test]
    fn snooze_deadline_exact_day_does_not_round() {
        let mut task = Task::deadline("pay rent".to_string(), date("2025-01-01"));
        task.snooze(Duration::hours(24)).unwrap();
        assert_eq!(
            task.kind(),
            &TaskKind::Deadline { due: date("2025-01-02") }
        );
    }

    #[test]
    fn snooze_deadline_below_one_hour_is_a_no_op() {
        // 30 minutes is zero whole hours, so there is nothing to round up
        let mut task = Task::deadline("pay rent".to_string(), date("2025-01-01"));
        task.snooze(Duration::minutes(30)).unwrap();
        assert_eq!(
            task.kind(),
            &TaskKind::Deadline { due: date("2025-01-01") }
        );
    }

    #[test]
    fn snooze_event_preserves_interval() {
        let mut task = Task::event(
            "meeting".to_string(),
            datetime("2025-12-31T14:00"),
            datetime("2025-12-31T15:00"),
        );
        task.snooze(Duration::hours(2)).unwrap();
        match task.kind() {
            TaskKind::Event { start, end } => {
                assert_eq!(*start, datetime("2025-12-31T16:00"));
                assert_eq!(*end, datetime("2025-12-31T17:00"));
                assert_eq!(*end - *start, Duration::hours(1));
            }
            other => panic!("expected an event, got {:?}", other),
        }
    }
}
