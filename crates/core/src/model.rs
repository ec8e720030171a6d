use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const DATE_DISPLAY_FORMAT: &str = "%b %-d %Y";

/// Failure to build a task from raw fields, whether they came from a typed
/// command or from a save-file line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Task description must not be empty")]
    EmptyDescription,
    #[error("Invalid date '{0}': expected yyyy-MM-dd")]
    InvalidDate(String),
    #[error("Event start and end must not be empty")]
    EmptyWindow,
}

/// The date/time shape of a task. The single-letter code doubles as the
/// discriminant written to the save file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { due: NaiveDate },
    Event { from: String, to: String },
}

impl TaskKind {
    pub fn code(&self) -> &'static str {
        match self {
            TaskKind::Todo => "T",
            TaskKind::Deadline { .. } => "D",
            TaskKind::Event { .. } => "E",
        }
    }
}

/// A single entry in the task list: a description, a done flag, and the
/// kind-specific fields. The description is fixed at construction; only the
/// done flag changes afterwards.
#[derive(Debug, Clone)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    /// Creates a plain task with no date component.
    pub fn todo(description: &str) -> Result<Self, TaskError> {
        Self::new(description, TaskKind::Todo)
    }

    /// Creates a deadline task. The due date must be ISO `yyyy-MM-dd`.
    pub fn deadline(description: &str, due: &str) -> Result<Self, TaskError> {
        let due = due.trim();
        let due = NaiveDate::parse_from_str(due, DATE_INPUT_FORMAT)
            .map_err(|_| TaskError::InvalidDate(due.to_string()))?;
        Self::new(description, TaskKind::Deadline { due })
    }

    /// Creates a time-window task. `from` and `to` are free text but must not
    /// be empty.
    pub fn event(description: &str, from: &str, to: &str) -> Result<Self, TaskError> {
        let from = from.trim();
        let to = to.trim();
        if from.is_empty() || to.is_empty() {
            return Err(TaskError::EmptyWindow);
        }
        Self::new(
            description,
            TaskKind::Event {
                from: from.to_string(),
                to: to.to_string(),
            },
        )
    }

    fn new(description: &str, kind: TaskKind) -> Result<Self, TaskError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskError::EmptyDescription);
        }
        Ok(Self {
            description: description.to_string(),
            done: false,
            kind,
        })
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

    /// Marks this task as done. Idempotent.
    pub fn mark(&mut self) {
        self.done = true;
    }

    /// Marks this task as not done. Idempotent.
    pub fn unmark(&mut self) {
        self.done = false;
    }

    fn status_icon(&self) -> &'static str {
        if self.done {
            "X"
        } else {
            " "
        }
    }

    /// Serializes this task into one line of the save file. Deadline dates
    /// are written in the ISO input form, never the pretty display form.
    pub fn encode(&self) -> String {
        let done = u8::from(self.done);
        match &self.kind {
            TaskKind::Todo => format!("T | {} | {}", done, self.description),
            TaskKind::Deadline { due } => format!(
                "D | {} | {} | {}",
                done,
                self.description,
                due.format(DATE_INPUT_FORMAT)
            ),
            TaskKind::Event { from, to } => {
                format!("E | {} | {} | {} | {}", done, self.description, from, to)
            }
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind.code(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { due } => {
                write!(f, " (by: {})", due.format(DATE_DISPLAY_FORMAT))
            }
            TaskKind::Event { from, to } => write!(f, " (from: {from} to: {to})"),
        }
    }
}

/// Equality backs duplicate detection: same kind and same description, with
/// events also comparing their window. The done flag and the deadline due
/// date are excluded.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        if self.description != other.description {
            return false;
        }
        match (&self.kind, &other.kind) {
            (TaskKind::Todo, TaskKind::Todo)
            | (TaskKind::Deadline { .. }, TaskKind::Deadline { .. }) => true,
            (
                TaskKind::Event { from, to },
                TaskKind::Event {
                    from: other_from,
                    to: other_to,
                },
            ) => from == other_from && to == other_to,
            _ => false,
        }
    }
}

impl Eq for Task {}
