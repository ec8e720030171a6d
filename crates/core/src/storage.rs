use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Task;

// Tolerates any amount of whitespace around the field delimiter.
static FIELD_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\|\s*").expect("valid regex"));

/// Persists the task list to a plain text file, one encoded task per line,
/// and loads it back. Loading is best-effort: lines that do not decode are
/// dropped so a damaged file still yields the tasks that survive. Saving is
/// authoritative: the file is fully rewritten in list order.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads tasks from disk. A missing file yields an empty list and the
    /// parent directory is created so the first save succeeds; the file
    /// itself is not created until then.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            self.ensure_parent()?;
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read save file at {}", self.path.display())
        })?;

        let mut tasks = Vec::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match decode_line(line) {
                Some(task) => tasks.push(task),
                None => tracing::debug!(line, "skipping unreadable save line"),
            }
        }
        Ok(tasks)
    }

    /// Rewrites the save file with one encoded line per task, in list order.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        self.ensure_parent()?;
        let mut contents = String::new();
        for task in tasks {
            contents.push_str(&task.encode());
            contents.push('\n');
        }
        fs::write(&self.path, contents).with_context(|| {
            format!("Failed to write save file at {}", self.path.display())
        })
    }

    fn ensure_parent(&self) -> Result<()> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() || parent.exists() {
            return Ok(());
        }
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create data directory at {}", parent.display())
        })
    }
}

// Decodes one save line; `None` for anything that does not parse. Trailing
// extra fields are tolerated, missing ones are not.
fn decode_line(line: &str) -> Option<Task> {
    let fields: Vec<&str> = FIELD_SPLIT.split(line.trim()).collect();
    let done = *fields.get(1)? == "1";

    let mut task = match *fields.first()? {
        "T" => Task::todo(fields.get(2)?).ok()?,
        "D" => Task::deadline(fields.get(2)?, fields.get(3)?).ok()?,
        "E" => Task::event(fields.get(2)?, fields.get(3)?, fields.get(4)?).ok()?,
        _ => return None,
    };
    if done {
        task.mark();
    }
    Some(task)
}
