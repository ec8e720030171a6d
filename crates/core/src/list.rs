use crate::model::Task;

const EMPTY_LIST: &str = "(no tasks yet)";
const NO_MATCHES: &str = "(no matching tasks)";

/// Ordered, mutable collection of tasks. Insertion order is the display
/// order; indices are 0-based here and translated to 1-based numbering only
/// when rendering. Index operations never panic: anything outside
/// `[0, len)` comes back as `None`.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Creates a list pre-populated with the given tasks, e.g. from storage.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task. The list itself enforces no uniqueness; callers check
    /// [`TaskList::contains`] first when duplicates must be rejected.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// True when an equal task (per model equality) is already present.
    pub fn contains(&self, task: &Task) -> bool {
        self.tasks.contains(task)
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Removes and returns the task at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Task> {
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    /// Marks the task at `index` as done and returns it.
    pub fn mark(&mut self, index: usize) -> Option<&Task> {
        let task = self.tasks.get_mut(index)?;
        task.mark();
        Some(task)
    }

    /// Marks the task at `index` as not done and returns it.
    pub fn unmark(&mut self, index: usize) -> Option<&Task> {
        let task = self.tasks.get_mut(index)?;
        task.unmark();
        Some(task)
    }

    /// Case-insensitive substring match over descriptions, in list order.
    pub fn find(&self, keyword: &str) -> Vec<&Task> {
        let needle = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.description().to_lowercase().contains(&needle))
            .collect()
    }

    /// The backing slice, in list order. Used by persistence.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Numbered listing of every task, or a fixed sentinel when empty.
    pub fn render_all(&self) -> String {
        if self.tasks.is_empty() {
            return EMPTY_LIST.to_string();
        }
        let mut out = String::from("Here are the tasks in your list:");
        for (position, task) in self.tasks.iter().enumerate() {
            out.push_str(&format!("\n{}.{}", position + 1, task));
        }
        out
    }

    /// Numbered listing of the tasks matching `keyword`, renumbered from 1,
    /// or a fixed sentinel when nothing matches.
    pub fn render_matches(&self, keyword: &str) -> String {
        let matches = self.find(keyword);
        if matches.is_empty() {
            return NO_MATCHES.to_string();
        }
        let mut out = String::from("Here are the matching tasks in your list:");
        for (position, task) in matches.iter().enumerate() {
            out.push_str(&format!("\n{}.{}", position + 1, task));
        }
        out
    }
}
