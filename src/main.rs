use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli::utils::init_logging(&cli.log_level);
    cli::run(cli)
}
