//! Top-level handling of one argument list: help output or command execution.

use tracing::{debug, info};

use crate::arguments::process_args;
use crate::console::Console;
use crate::dispatch::{Dispatcher, InvocationResponse};
use crate::docs;
use crate::registry::CommandCatalog;
use crate::settings::Settings;
use crate::shell::Shell;

/// Ties settings, the command catalog and a console together.
pub struct Processor<'a, C: CommandCatalog + ?Sized, W: Console> {
    settings: &'a Settings,
    catalog: &'a C,
    console: W,
}

impl<'a, C: CommandCatalog + ?Sized, W: Console> Processor<'a, C, W> {
    pub fn new(settings: &'a Settings, catalog: &'a C, console: W) -> Self {
        Self {
            settings,
            catalog,
            console,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn console_mut(&mut self) -> &mut W {
        &mut self.console
    }

    pub fn into_console(self) -> W {
        self.console
    }

    /// Entry point for a program's arguments.
    ///
    /// Without arguments this enters the interactive loop when enabled, otherwise it
    /// asks for a controller and reports failure.
    pub fn run<S: AsRef<str>>(&mut self, args: &[S]) -> bool {
        if !args.is_empty() {
            return self.process(args);
        }
        if self.settings.loop_enabled {
            info!("no arguments given, entering interactive loop");
            Shell::new(self).run();
            return true;
        }
        let message = format!(
            "Please enter a controller. Use '{}' to see available controllers.",
            self.settings.help_marker
        );
        self.console.write_line(&message);
        false
    }

    /// Handle one argument list and write the resulting lines to the console.
    pub fn process<S: AsRef<str>>(&mut self, args: &[S]) -> bool {
        let response = self.respond(args);
        for message in &response.messages {
            self.console.write_line(message);
        }
        response.succeeded
    }

    /// Compute the response for one argument list without writing anything.
    ///
    /// Help calls succeed and carry the documentation lines as messages.
    pub fn respond<S: AsRef<str>>(&self, args: &[S]) -> InvocationResponse {
        let arguments = process_args(args, self.settings);
        let controller = arguments
            .controller
            .as_deref()
            .and_then(|name| self.catalog.controller(name));

        if arguments.is_help_call {
            let lines = match controller {
                Some(controller) => docs::controller_command_lines(
                    controller,
                    arguments.command.as_deref(),
                    self.settings,
                ),
                None => self
                    .catalog
                    .controllers()
                    .iter()
                    .map(docs::controller_line)
                    .collect(),
            };
            debug!(lines = lines.len(), "rendered help");
            return InvocationResponse {
                succeeded: true,
                messages: lines,
            };
        }

        let Some(controller) = controller else {
            return InvocationResponse::failure(vec![format!(
                "'{}' is not a valid controller. Use '{}' to see available controllers.",
                arguments.controller.as_deref().unwrap_or(""),
                self.settings.help_marker
            )]);
        };

        Dispatcher::new(self.settings, self.catalog).execute(
            controller,
            arguments.command.as_deref(),
            &arguments.arguments,
        )
    }
}
