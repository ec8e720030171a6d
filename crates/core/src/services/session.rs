use crate::config::AppConfig;
use crate::list::TaskList;
use crate::parser::{self, CommandError, Response};
use crate::storage::Storage;

/// One interactive session: the task list plus the storage it persists to.
/// The list is loaded once when the session opens; every mutating command
/// re-saves it through the same storage.
#[derive(Debug)]
pub struct Session {
    tasks: TaskList,
    storage: Storage,
    recovered: bool,
}

impl Session {
    /// Opens a session against the configured save file.
    pub fn open(config: &AppConfig) -> Self {
        Self::with_storage(Storage::new(config.save_path()))
    }

    /// Opens a session against an explicit storage. Loading is best-effort:
    /// a failed load starts the session with an empty list instead of
    /// refusing to start.
    pub fn with_storage(storage: Storage) -> Self {
        let (tasks, recovered) = match storage.load() {
            Ok(tasks) => (TaskList::from_tasks(tasks), false),
            Err(err) => {
                tracing::warn!(error = %err, "couldn't load saved tasks, starting fresh");
                (TaskList::new(), true)
            }
        };
        Self {
            tasks,
            storage,
            recovered,
        }
    }

    /// True when the saved list could not be read and the session started
    /// empty instead.
    pub fn started_fresh(&self) -> bool {
        self.recovered
    }

    /// Interprets one input line, mutating the list and persisting as needed.
    pub fn handle_line(&mut self, input: &str) -> Result<Response, CommandError> {
        parser::handle_line(input, &mut self.tasks, &self.storage)
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }
}
