use anyhow::Result;
use jot_core::AppConfig;

use crate::cli::Cli;

pub fn from_cli(cli: &Cli) -> Result<AppConfig> {
    AppConfig::discover(cli.data_dir.clone())
}
