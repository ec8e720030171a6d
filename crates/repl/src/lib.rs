pub mod cli;
pub mod config;
pub mod ui;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use jot_core::{AppConfig, Response, Session};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::ui::Ui;

/// Runs the blocking read/print loop on stdin/stdout until `bye` or
/// end of input.
pub fn run(config: &AppConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(config, stdin.lock(), stdout.lock())
}

/// Drives a session over arbitrary input/output, one line at a time. Command
/// errors are shown and the loop keeps reading; only `bye` or exhausted
/// input end it.
pub fn run_with<R: BufRead, W: Write>(config: &AppConfig, input: R, output: W) -> Result<()> {
    let mut session = Session::open(config);
    let mut ui = Ui::new(output);

    ui.show_greeting()?;
    if session.started_fresh() {
        ui.show_load_note()?;
    }

    for line in input.lines() {
        let line = line?;
        match session.handle_line(&line) {
            Ok(Response::Message(body)) => ui.show(&body)?,
            Ok(Response::Empty) => {}
            Ok(Response::Exit) => {
                ui.show_farewell()?;
                return Ok(());
            }
            Err(err) => ui.show_error(&err.to_string())?,
        }
    }
    Ok(())
}

/// Installs the stderr tracing subscriber, honouring `RUST_LOG` and an
/// optional explicit directive from the command line.
pub fn init_tracing(filter: Option<String>) -> Result<()> {
    let filter = filter.unwrap_or_else(|| "warn".to_string());
    let directive: Directive = filter.parse()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}
