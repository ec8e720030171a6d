use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "jot",
    version,
    about = "A line-oriented task manager that keeps your list in a plain text file.",
    after_help = "Commands once inside:\n  todo <desc>\n  deadline <desc> /by <yyyy-MM-dd>\n  event <desc> /from <start> /to <end>\n  list\n  find <keyword>\n  mark <n> | unmark <n> | delete <n>\n  bye"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Override the tracing filter (e.g. "info", "debug")
    #[arg(long = "log", value_name = "DIRECTIVE")]
    pub log_filter: Option<String>,
}
