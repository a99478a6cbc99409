//! Command-line host for the `cliroute` binary.
//!
//! clap parses the host options; everything after them is handed untouched to the
//! dispatch engine, which routes it to the demo controllers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cliroute::{Console, Processor, Registry, StdConsole};

pub mod demo;
pub mod utils;

/// Parsed host options for the `cliroute` binary.
#[derive(Parser, Debug)]
#[command(
    name = "cliroute",
    version,
    about = "Route `<controller> <command> [--param value ...] [?]` to registered commands"
)]
pub struct Cli {
    /// JSON settings file (missing keys keep their defaults).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enter the interactive loop when no engine arguments are given.
    #[arg(long)]
    pub interactive: bool,

    /// Show default values in parameter documentation.
    #[arg(long)]
    pub detailed: bool,

    /// Token that requests documentation instead of execution.
    #[arg(long = "help-marker", value_name = "MARKER")]
    pub help_marker: Option<String>,

    /// Prefix marking named arguments.
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    /// Print the response as JSON instead of plain lines.
    #[arg(long)]
    pub json: bool,

    /// Controller, command and named arguments for the engine.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Execute the engine with the parsed host options.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let settings = utils::load_settings(&cli)?;
    let registry = demo::registry();
    let mut processor = Processor::new(&settings, &registry, StdConsole);

    let succeeded = if cli.json && !cli.args.is_empty() {
        let (succeeded, rendered) = json_response(&processor, &cli.args)?;
        println!("{rendered}");
        succeeded
    } else {
        processor.run(&cli.args)
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Respond to `args` without touching the console and render the response as JSON.
fn json_response<W: Console>(
    processor: &Processor<'_, Registry, W>,
    args: &[String],
) -> Result<(bool, String)> {
    let response = processor.respond(args);
    let rendered =
        serde_json::to_string_pretty(&response).context("failed to serialize response")?;
    Ok((response.succeeded, rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliroute::BufferConsole;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn json_for(argv: &[&str]) -> (bool, serde_json::Value, BufferConsole) {
        let cli = Cli::try_parse_from(argv.iter().copied()).unwrap();
        assert!(cli.json);
        let settings = utils::load_settings(&cli).unwrap();
        let registry = demo::registry();
        let processor = Processor::new(&settings, &registry, BufferConsole::new());
        let (succeeded, rendered) = json_response(&processor, &cli.args).unwrap();
        let parsed = serde_json::from_str(&rendered).unwrap();
        (succeeded, parsed, processor.into_console())
    }

    #[test]
    fn json_output_carries_command_lines() {
        let (succeeded, parsed, console) = json_for(&[
            "cliroute",
            "--json",
            "math",
            "add",
            "--firstNum",
            "1",
            "--secondNum",
            "2",
        ]);
        assert!(succeeded);
        assert_eq!(parsed, json!({ "succeeded": true, "messages": ["3"] }));
        assert_eq!(console.output(), "");
    }

    #[test]
    fn json_output_for_failures() {
        let (succeeded, parsed, _) =
            json_for(&["cliroute", "--json", "math", "divide", "--dividend", "1", "--divisor", "0"]);
        assert!(!succeeded);
        assert_eq!(parsed["succeeded"], json!(false));
        assert_eq!(
            parsed["messages"][0],
            json!("An error occurred while executing the command.")
        );
        assert_eq!(parsed["messages"][1], json!("Message: cannot divide 1 by zero"));
    }

    #[test]
    fn greeting_defaults_and_flags() {
        let (_, parsed, _) = json_for(&["cliroute", "--json", "greet", "--n", "Ada", "--s", "--times", "2"]);
        assert_eq!(parsed["messages"], json!(["HELLO, ADA!", "HELLO, ADA!"]));

        let (_, parsed, _) = json_for(&["cliroute", "--json", "greet"]);
        assert_eq!(parsed["messages"], json!(["Hello, world!"]));
    }
}
