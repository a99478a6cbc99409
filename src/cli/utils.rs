//! Settings layering and logging setup for the binary.

use anyhow::Result;
use cliroute::{ParamDetail, Settings};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Defaults, then the optional JSON file, then individual flags.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if cli.interactive {
        settings.loop_enabled = true;
    }
    if cli.detailed {
        settings.param_detail = ParamDetail::Detailed;
    }
    if let Some(marker) = &cli.help_marker {
        settings.help_marker = marker.clone();
    }
    if let Some(prefix) = &cli.prefix {
        settings.argument_prefix = prefix.clone();
    }
    Ok(settings)
}

/// Log to stderr so diagnostics never mix with command output.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
