//! Positional controller/command extraction and grouping of named arguments.

use serde::Serialize;
use tracing::debug;

use crate::settings::Settings;

/// One `--name value...` group taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedArgument {
    /// Flag name with the argument prefix removed.
    pub name: String,
    /// 1-based position among the named arguments of one invocation.
    pub order: usize,
    pub values: Vec<String>,
}

impl NamedArgument {
    pub fn new<S: Into<String>>(name: S, order: usize) -> Self {
        Self {
            name: name.into(),
            order,
            values: Vec::new(),
        }
    }

    pub fn with_values<S, I, V>(name: S, order: usize, values: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            order,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of splitting a full argument list into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedArguments {
    pub controller: Option<String>,
    pub command: Option<String>,
    pub arguments: Vec<NamedArgument>,
    pub is_help_call: bool,
}

/// Group tokens into named arguments.
///
/// A token starting with `prefix` opens a new group; following tokens become its values
/// until the next prefixed token. Tokens before the first prefixed token are dropped.
pub fn group_arguments<S: AsRef<str>>(tokens: &[S], prefix: &str) -> Vec<NamedArgument> {
    let mut groups: Vec<NamedArgument> = Vec::new();
    let mut current: Option<NamedArgument> = None;

    for token in tokens {
        let token = token.as_ref();
        if let Some(name) = token.strip_prefix(prefix) {
            if let Some(done) = current.take() {
                groups.push(done);
            }
            current = Some(NamedArgument::new(name, groups.len() + 1));
        } else if let Some(group) = current.as_mut() {
            group.values.push(token.to_string());
        }
    }
    groups.extend(current);

    debug!(groups = groups.len(), "grouped named arguments");
    groups
}

/// Split raw arguments into controller, command, named arguments and the help flag.
///
/// The first two positions are the controller and command names unless they hold the
/// help marker. A prefixed token in the command position is read as the first named
/// argument of a controller's default command.
pub fn process_args<S: AsRef<str>>(args: &[S], settings: &Settings) -> ProcessedArguments {
    let mut processed = ProcessedArguments::default();
    let Some(last) = args.last() else {
        return processed;
    };

    processed.is_help_call = last.as_ref() == settings.help_marker;
    processed.controller = positional(args, 0, settings);
    processed.command = positional(args, 1, settings);

    let mut start = 2;
    if processed
        .command
        .as_deref()
        .is_some_and(|command| command.starts_with(&settings.argument_prefix))
    {
        start = 1;
        processed.command = None;
    }

    if args.len() > start && !processed.is_help_call {
        processed.arguments = group_arguments(&args[start..], &settings.argument_prefix);
    }

    debug!(
        controller = processed.controller.as_deref().unwrap_or(""),
        command = processed.command.as_deref().unwrap_or(""),
        help = processed.is_help_call,
        "processed arguments"
    );
    processed
}

fn positional<S: AsRef<str>>(args: &[S], index: usize, settings: &Settings) -> Option<String> {
    args.get(index)
        .map(|arg| arg.as_ref())
        .filter(|arg| *arg != settings.help_marker)
        .map(str::to_string)
}
