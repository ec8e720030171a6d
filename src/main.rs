use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = jot::cli::Cli::parse();
    jot::repl::init_tracing(cli.log_filter.clone())?;

    let config = jot::config::from_cli(&cli)?;
    jot::repl::run(&config)
}
