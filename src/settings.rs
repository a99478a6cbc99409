//! Engine configuration shared by every component.
//!
//! A single immutable [`Settings`] value is built once by the host and passed by
//! reference to the parser, binder, dispatcher and documentation formatter.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How much detail parameter documentation includes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamDetail {
    #[default]
    Simple,
    Detailed,
}

/// Markers and switches consulted while parsing, dispatching and documenting commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Token that turns an invocation into a help call.
    pub help_marker: String,
    /// Prefix that marks a token as a named argument.
    pub argument_prefix: String,
    pub param_detail: ParamDetail,
    /// Prompt written before each line in the interactive loop.
    pub input_indicator: String,
    /// First token that leaves the interactive loop.
    pub exit_keyword: String,
    /// Enter the interactive loop when started without arguments.
    pub loop_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            help_marker: "?".to_string(),
            argument_prefix: "--".to_string(),
            param_detail: ParamDetail::Simple,
            input_indicator: ">".to_string(),
            exit_keyword: "exit".to_string(),
            loop_enabled: false,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn is_detailed(&self) -> bool {
        self.param_detail == ParamDetail::Detailed
    }
}
