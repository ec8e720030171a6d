use std::io::{self, Write};

const FRAME: &str = "____________________________________________________________";
const GREETING: &str = "Hello! I am jot.\nWhat can I do for you?";
const FAREWELL: &str = "Bye. Hope to see you again soon!";
const LOAD_NOTE: &str = "Note: couldn't load saved tasks. Starting fresh.";

/// Frames every message shown to the user between two rules, with each body
/// line indented one space. Writes to any [`Write`] so tests can capture the
/// exact output.
pub struct Ui<W: Write> {
    writer: W,
}

impl<W: Write> Ui<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Shows arbitrary text inside the standard frame.
    pub fn show(&mut self, body: &str) -> io::Result<()> {
        writeln!(self.writer, "{FRAME}")?;
        for line in body.lines() {
            writeln!(self.writer, " {line}")?;
        }
        writeln!(self.writer, "{FRAME}")
    }

    pub fn show_greeting(&mut self) -> io::Result<()> {
        self.show(GREETING)
    }

    pub fn show_farewell(&mut self) -> io::Result<()> {
        self.show(FAREWELL)
    }

    pub fn show_load_note(&mut self) -> io::Result<()> {
        self.show(LOAD_NOTE)
    }

    /// Shows an error message in a friendly way.
    pub fn show_error(&mut self, message: &str) -> io::Result<()> {
        self.show(&format!("Oops - {message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn captured(render: impl FnOnce(&mut Ui<&mut Vec<u8>>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        let mut ui = Ui::new(&mut buffer);
        render(&mut ui).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn show_frames_and_indents_every_line() {
        let output = captured(|ui| ui.show("first\nsecond"));
        assert_eq!(
            output,
            format!("{FRAME}\n first\n second\n{FRAME}\n")
        );
    }

    #[test]
    fn errors_get_the_oops_prefix() {
        let output = captured(|ui| ui.show_error("This task already exists in your list!"));
        assert!(output.contains(" Oops - This task already exists in your list!"));
    }
}
