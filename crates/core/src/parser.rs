use thiserror::Error;

use crate::list::TaskList;
use crate::model::Task;
use crate::storage::Storage;

const TODO_USAGE: &str = "The description of a todo cannot be empty.\n Try: todo borrow book";
const DEADLINE_USAGE: &str = "Usage: deadline <desc> /by <yyyy-MM-dd>";
const DEADLINE_PARTS_REQUIRED: &str = "Description and ISO date (yyyy-MM-dd) must be provided.";
const EVENT_USAGE: &str = "Usage: event <desc> /from <start> /to <end>";
const EVENT_PARTS_REQUIRED: &str = "Description, '/from', and '/to' must be provided.";
const FIND_USAGE: &str = "Usage: find <keyword>";
const MARK_USAGE: &str = "Usage: mark <task number>";
const UNMARK_USAGE: &str = "Usage: unmark <task number>";
const DELETE_USAGE: &str = "Usage: delete <task number>";
const MISSING_BY: &str = "Missing '/by'. Try: deadline return book /by 2019-10-15";
const MISSING_FROM_TO: &str = "Missing '/from' or '/to'. Try: event meeting /from Mon 2pm /to 4pm";
const SAVE_WARNING: &str = "Warning: couldn't save tasks to disk.";

const BY_MARKER: &str = " /by ";
const FROM_MARKER: &str = " /from ";
const TO_MARKER: &str = " /to ";

/// Errors produced while interpreting a single command line. Every variant
/// is recovered at the command boundary: the session survives and only the
/// offending command is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{usage}")]
    MissingArgument { usage: &'static str },
    #[error("{hint}")]
    MalformedCommand { hint: &'static str },
    #[error("Invalid date. Use yyyy-MM-dd (e.g. 2019-10-15).")]
    InvalidDate,
    #[error("Task number must be a positive integer. Usage: {command} <task number>")]
    NotANumber { command: &'static str },
    #[error("Task {token} is out of range (1..{size}).")]
    IndexOutOfRange { token: String, size: usize },
    #[error("This task already exists in your list!")]
    DuplicateTask,
    #[error("I don't recognise that command: '{0}'.")]
    UnknownCommand(String),
}

/// Outcome of interpreting one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A confirmation or listing to show the user.
    Message(String),
    /// Blank input: nothing to do, nothing to say.
    Empty,
    /// The user asked to end the session.
    Exit,
}

/// Interprets one raw input line against the task list, persisting the whole
/// list after every successful mutation. The interpreter keeps no state of
/// its own between calls.
pub fn handle_line(
    input: &str,
    tasks: &mut TaskList,
    storage: &Storage,
) -> Result<Response, CommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Response::Empty);
    }

    let (command, rest) = split_command(input);
    match command {
        "bye" => Ok(Response::Exit),
        "list" => Ok(Response::Message(tasks.render_all())),
        "find" => handle_find(rest, tasks),
        "todo" => handle_todo(rest, tasks, storage),
        "deadline" => handle_deadline(rest, tasks, storage),
        "event" => handle_event(rest, tasks, storage),
        "mark" => handle_mark(rest, tasks, storage),
        "unmark" => handle_unmark(rest, tasks, storage),
        "delete" => handle_delete(rest, tasks, storage),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

// Splits on the first whitespace run: command token plus the untouched
// remainder. Sub-markers are parsed per-command, never here.
fn split_command(input: &str) -> (&str, &str) {
    match input.find(char::is_whitespace) {
        Some(at) => (&input[..at], input[at..].trim_start()),
        None => (input, ""),
    }
}

fn handle_find(rest: &str, tasks: &TaskList) -> Result<Response, CommandError> {
    let keyword = require_arg(rest, FIND_USAGE)?;
    Ok(Response::Message(tasks.render_matches(keyword)))
}

fn handle_todo(
    rest: &str,
    tasks: &mut TaskList,
    storage: &Storage,
) -> Result<Response, CommandError> {
    let description = require_arg(rest, TODO_USAGE)?;
    let task = Task::todo(description)
        .map_err(|_| CommandError::MissingArgument { usage: TODO_USAGE })?;
    add_task(task, tasks, storage)
}

fn handle_deadline(
    rest: &str,
    tasks: &mut TaskList,
    storage: &Storage,
) -> Result<Response, CommandError> {
    let rest = require_arg(rest, DEADLINE_USAGE)?;
    let at = rest
        .find(BY_MARKER)
        .ok_or(CommandError::MalformedCommand { hint: MISSING_BY })?;

    let description = rest[..at].trim();
    let by = rest[at + BY_MARKER.len()..].trim();
    if description.is_empty() || by.is_empty() {
        return Err(CommandError::MissingArgument {
            usage: DEADLINE_PARTS_REQUIRED,
        });
    }

    let task = Task::deadline(description, by).map_err(|_| CommandError::InvalidDate)?;
    add_task(task, tasks, storage)
}

fn handle_event(
    rest: &str,
    tasks: &mut TaskList,
    storage: &Storage,
) -> Result<Response, CommandError> {
    let rest = require_arg(rest, EVENT_USAGE)?;
    let (from_at, to_at) = match (rest.find(FROM_MARKER), rest.find(TO_MARKER)) {
        (Some(from_at), Some(to_at)) if to_at >= from_at + FROM_MARKER.len() => (from_at, to_at),
        _ => {
            return Err(CommandError::MalformedCommand {
                hint: MISSING_FROM_TO,
            })
        }
    };

    let description = rest[..from_at].trim();
    let from = rest[from_at + FROM_MARKER.len()..to_at].trim();
    let to = rest[to_at + TO_MARKER.len()..].trim();
    if description.is_empty() || from.is_empty() || to.is_empty() {
        return Err(CommandError::MissingArgument {
            usage: EVENT_PARTS_REQUIRED,
        });
    }

    let task = Task::event(description, from, to).map_err(|_| CommandError::MissingArgument {
        usage: EVENT_PARTS_REQUIRED,
    })?;
    add_task(task, tasks, storage)
}

fn handle_mark(
    rest: &str,
    tasks: &mut TaskList,
    storage: &Storage,
) -> Result<Response, CommandError> {
    let index = parse_index(rest, tasks.len(), "mark", MARK_USAGE)?;
    let size = tasks.len();
    let Some(task) = tasks.mark(index) else {
        return Err(out_of_range(index, size));
    };
    let message = format!("Nice! I've marked this task as done:\n {task}");
    Ok(Response::Message(with_save(message, tasks, storage)))
}

fn handle_unmark(
    rest: &str,
    tasks: &mut TaskList,
    storage: &Storage,
) -> Result<Response, CommandError> {
    let index = parse_index(rest, tasks.len(), "unmark", UNMARK_USAGE)?;
    let size = tasks.len();
    let Some(task) = tasks.unmark(index) else {
        return Err(out_of_range(index, size));
    };
    let message = format!("OK, I've marked this task as not done yet:\n {task}");
    Ok(Response::Message(with_save(message, tasks, storage)))
}

fn handle_delete(
    rest: &str,
    tasks: &mut TaskList,
    storage: &Storage,
) -> Result<Response, CommandError> {
    let index = parse_index(rest, tasks.len(), "delete", DELETE_USAGE)?;
    let size = tasks.len();
    let Some(removed) = tasks.remove(index) else {
        return Err(out_of_range(index, size));
    };
    let message = format!(
        "Noted. I've removed this task:\n {removed}\nNow you have {} tasks in the list.",
        tasks.len()
    );
    Ok(Response::Message(with_save(message, tasks, storage)))
}

// Duplicate detection runs before the append, so a rejected task never
// touches the list or triggers a save.
fn add_task(
    task: Task,
    tasks: &mut TaskList,
    storage: &Storage,
) -> Result<Response, CommandError> {
    if tasks.contains(&task) {
        return Err(CommandError::DuplicateTask);
    }
    let message = format!(
        "Got it. I've added this task:\n {task}\nNow you have {} tasks in the list.",
        tasks.len() + 1
    );
    tasks.add(task);
    Ok(Response::Message(with_save(message, tasks, storage)))
}

// A failed save keeps the in-memory change; the list and the file may
// diverge until the next successful save.
fn with_save(message: String, tasks: &TaskList, storage: &Storage) -> String {
    match storage.save(tasks.tasks()) {
        Ok(()) => message,
        Err(err) => {
            tracing::warn!(error = %err, "failed to persist task list");
            format!("{message}\n{SAVE_WARNING}")
        }
    }
}

fn require_arg<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(CommandError::MissingArgument { usage });
    }
    Ok(rest)
}

// Translates a 1-based user-facing task number into a 0-based index,
// range-checked against the current size.
fn parse_index(
    rest: &str,
    size: usize,
    command: &'static str,
    usage: &'static str,
) -> Result<usize, CommandError> {
    let token = require_arg(rest, usage)?;
    let number: i64 = token
        .parse()
        .map_err(|_| CommandError::NotANumber { command })?;
    if number < 1 || number > size as i64 {
        return Err(CommandError::IndexOutOfRange {
            token: token.to_string(),
            size,
        });
    }
    Ok((number - 1) as usize)
}

fn out_of_range(index: usize, size: usize) -> CommandError {
    CommandError::IndexOutOfRange {
        token: (index + 1).to_string(),
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TaskList, Storage, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.txt"));
        (TaskList::new(), storage, dir)
    }

    fn message(response: Response) -> String {
        match response {
            Response::Message(body) => body,
            other => panic!("expected a message, got {other:?}"),
        }
    }

    #[test]
    fn blank_input_is_a_silent_no_op() {
        let (mut tasks, storage, _dir) = fixture();
        assert_eq!(handle_line("   ", &mut tasks, &storage), Ok(Response::Empty));
        assert!(tasks.is_empty());
        assert!(!storage.path().exists());
    }

    #[test]
    fn bye_signals_exit_without_touching_the_list() {
        let (mut tasks, storage, _dir) = fixture();
        assert_eq!(handle_line("bye", &mut tasks, &storage), Ok(Response::Exit));
        assert!(!storage.path().exists());
    }

    #[test]
    fn todo_appends_saves_and_confirms_with_new_size() {
        let (mut tasks, storage, _dir) = fixture();
        let response = handle_line("todo read book", &mut tasks, &storage).unwrap();
        assert_eq!(
            message(response),
            "Got it. I've added this task:\n [T][ ] read book\nNow you have 1 tasks in the list."
        );
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            fs::read_to_string(storage.path()).unwrap(),
            "T | 0 | read book\n"
        );
    }

    #[test]
    fn end_to_end_flow_renumbers_and_persists() {
        let (mut tasks, storage, _dir) = fixture();

        handle_line("todo read book", &mut tasks, &storage).unwrap();
        handle_line("deadline return book /by 2025-10-15", &mut tasks, &storage).unwrap();

        let marked = message(handle_line("mark 2", &mut tasks, &storage).unwrap());
        assert_eq!(
            marked,
            "Nice! I've marked this task as done:\n [D][X] return book (by: Oct 15 2025)"
        );

        let deleted = message(handle_line("delete 1", &mut tasks, &storage).unwrap());
        assert_eq!(
            deleted,
            "Noted. I've removed this task:\n [T][ ] read book\nNow you have 1 tasks in the list."
        );

        let listing = message(handle_line("list", &mut tasks, &storage).unwrap());
        assert_eq!(
            listing,
            "Here are the tasks in your list:\n1.[D][X] return book (by: Oct 15 2025)"
        );
        assert_eq!(
            fs::read_to_string(storage.path()).unwrap(),
            "D | 1 | return book | 2025-10-15\n"
        );
    }

    #[test]
    fn event_parses_markers_and_renders_window() {
        let (mut tasks, storage, _dir) = fixture();
        handle_line("event proj /from Mon 2pm /to 4pm", &mut tasks, &storage).unwrap();

        let listing = message(handle_line("list", &mut tasks, &storage).unwrap());
        assert_eq!(
            listing,
            "Here are the tasks in your list:\n1.[E][ ] proj (from: Mon 2pm to: 4pm)"
        );
    }

    #[test]
    fn unmark_restores_the_open_status() {
        let (mut tasks, storage, _dir) = fixture();
        handle_line("todo water plants", &mut tasks, &storage).unwrap();
        handle_line("mark 1", &mut tasks, &storage).unwrap();

        let response = message(handle_line("unmark 1", &mut tasks, &storage).unwrap());
        assert_eq!(
            response,
            "OK, I've marked this task as not done yet:\n [T][ ] water plants"
        );
        assert_eq!(
            fs::read_to_string(storage.path()).unwrap(),
            "T | 0 | water plants\n"
        );
    }

    #[test]
    fn find_matches_case_insensitively() {
        let (mut tasks, storage, _dir) = fixture();
        handle_line("todo return book", &mut tasks, &storage).unwrap();
        handle_line("todo buy milk", &mut tasks, &storage).unwrap();

        let found = message(handle_line("find BOOK", &mut tasks, &storage).unwrap());
        assert_eq!(
            found,
            "Here are the matching tasks in your list:\n1.[T][ ] return book"
        );

        let none = message(handle_line("find cheese", &mut tasks, &storage).unwrap());
        assert_eq!(none, "(no matching tasks)");
    }

    #[rstest]
    #[case::todo_missing_description("todo   ")]
    #[case::find_missing_keyword("find")]
    #[case::mark_missing_number("mark")]
    #[case::event_empty_window("event proj /from  /to 4pm")]
    fn missing_arguments_are_rejected(#[case] input: &str) {
        let (mut tasks, storage, _dir) = fixture();
        let err = handle_line(input, &mut tasks, &storage).unwrap_err();
        assert!(
            matches!(err, CommandError::MissingArgument { .. }),
            "{input:?} produced {err:?}"
        );
        assert!(tasks.is_empty());
    }

    #[rstest]
    #[case::deadline_without_marker("deadline report 2025-10-15")]
    #[case::event_without_markers("event proj Mon 2pm")]
    #[case::event_missing_to("event proj /from Mon 2pm")]
    #[case::event_to_before_from("event proj /to 4pm /from Mon 2pm")]
    fn malformed_markers_are_rejected(#[case] input: &str) {
        let (mut tasks, storage, _dir) = fixture();
        let err = handle_line(input, &mut tasks, &storage).unwrap_err();
        assert!(
            matches!(err, CommandError::MalformedCommand { .. }),
            "{input:?} produced {err:?}"
        );
        assert!(tasks.is_empty());
    }

    #[test]
    fn deadline_with_unparsable_date_is_invalid() {
        let (mut tasks, storage, _dir) = fixture();
        let err = handle_line("deadline report /by not-a-date", &mut tasks, &storage).unwrap_err();
        assert_eq!(err, CommandError::InvalidDate);
        assert_eq!(
            err.to_string(),
            "Invalid date. Use yyyy-MM-dd (e.g. 2019-10-15)."
        );
        assert!(tasks.is_empty());
    }

    #[rstest]
    #[case::zero("mark 0")]
    #[case::negative("mark -1")]
    #[case::past_end("mark 2")]
    fn index_out_of_range_leaves_list_unmutated(#[case] input: &str) {
        let (mut tasks, storage, _dir) = fixture();
        handle_line("todo read book", &mut tasks, &storage).unwrap();

        let err = handle_line(input, &mut tasks, &storage).unwrap_err();
        assert!(
            matches!(err, CommandError::IndexOutOfRange { .. }),
            "{input:?} produced {err:?}"
        );
        assert!(!tasks.get(0).unwrap().is_done());
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn out_of_range_message_carries_token_and_size() {
        let (mut tasks, storage, _dir) = fixture();
        handle_line("todo read book", &mut tasks, &storage).unwrap();

        let err = handle_line("delete 5", &mut tasks, &storage).unwrap_err();
        assert_eq!(err.to_string(), "Task 5 is out of range (1..1).");
    }

    #[test]
    fn non_numeric_index_is_not_a_number() {
        let (mut tasks, storage, _dir) = fixture();
        handle_line("todo read book", &mut tasks, &storage).unwrap();

        let err = handle_line("mark abc", &mut tasks, &storage).unwrap_err();
        assert_eq!(err, CommandError::NotANumber { command: "mark" });
        assert_eq!(
            err.to_string(),
            "Task number must be a positive integer. Usage: mark <task number>"
        );
    }

    #[test]
    fn unknown_command_reports_the_token() {
        let (mut tasks, storage, _dir) = fixture();
        let err = handle_line("abracadabra now", &mut tasks, &storage).unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("abracadabra".to_string()));
        assert_eq!(
            err.to_string(),
            "I don't recognise that command: 'abracadabra'."
        );
    }

    #[test]
    fn duplicate_additions_are_rejected_before_any_mutation() {
        let (mut tasks, storage, _dir) = fixture();
        handle_line("todo read book", &mut tasks, &storage).unwrap();
        let saved = fs::read_to_string(storage.path()).unwrap();

        let err = handle_line("todo read book", &mut tasks, &storage).unwrap_err();
        assert_eq!(err, CommandError::DuplicateTask);
        assert_eq!(tasks.len(), 1);
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), saved);
    }

    #[test]
    fn deadline_duplicates_ignore_the_due_date() {
        let (mut tasks, storage, _dir) = fixture();
        handle_line("deadline return book /by 2025-10-15", &mut tasks, &storage).unwrap();

        let err =
            handle_line("deadline return book /by 2026-01-01", &mut tasks, &storage).unwrap_err();
        assert_eq!(err, CommandError::DuplicateTask);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn events_with_different_windows_are_not_duplicates() {
        let (mut tasks, storage, _dir) = fixture();
        handle_line("event standup /from Mon 9am /to 10am", &mut tasks, &storage).unwrap();
        handle_line("event standup /from Tue 9am /to 10am", &mut tasks, &storage).unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn failed_save_appends_warning_and_keeps_the_mutation() {
        let dir = TempDir::new().unwrap();
        // Pointing the save path at a directory makes every write fail.
        let storage = Storage::new(dir.path());
        let mut tasks = TaskList::new();

        let response = message(handle_line("todo read book", &mut tasks, &storage).unwrap());
        assert!(
            response.ends_with("Warning: couldn't save tasks to disk."),
            "unexpected response: {response}"
        );
        assert_eq!(tasks.len(), 1);
    }
}
