//! Interactive read loop.

use tracing::debug;

use crate::console::Console;
use crate::processor::Processor;
use crate::registry::CommandCatalog;
use crate::tokenizer::tokenize;

/// Prompts for command lines and processes them until the exit keyword or end of input.
pub struct Shell<'p, 'a, C: CommandCatalog + ?Sized, W: Console> {
    processor: &'p mut Processor<'a, C, W>,
}

impl<'p, 'a, C: CommandCatalog + ?Sized, W: Console> Shell<'p, 'a, C, W> {
    pub fn new(processor: &'p mut Processor<'a, C, W>) -> Self {
        Self { processor }
    }

    pub fn run(&mut self) {
        let prompt = format!("{} ", self.processor.settings().input_indicator);
        let exit = self.processor.settings().exit_keyword.clone();

        loop {
            self.processor.console_mut().write(&prompt);
            let Some(line) = self.processor.console_mut().read_line() else {
                debug!("input closed, leaving interactive loop");
                break;
            };
            let tokens = tokenize(&line);
            if tokens.first().is_some_and(|first| *first == exit) {
                break;
            }
            if !tokens.is_empty() {
                let succeeded = self.processor.process(&tokens);
                debug!(succeeded, "processed interactive command");
            }
            self.processor.console_mut().write_line("");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufferConsole;
    use crate::descriptor::CommandDescriptor;
    use crate::registry::{Controller, Registry, Target};
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;

    fn registry() -> Registry {
        Registry::new().register(
            Controller::new("svc", "Service commands")
                .command(CommandDescriptor::new("ping"), Target::from_fn(|_| Ok(()))),
        )
    }

    #[test]
    fn loops_until_exit_keyword() {
        let registry = registry();
        let settings = Settings {
            loop_enabled: true,
            ..Settings::default()
        };
        let console = BufferConsole::with_input(["svc ping", "", "svc nope", "exit", "svc ping"]);
        let mut processor = Processor::new(&settings, &registry, console);
        let args: [&str; 0] = [];
        assert!(processor.run(&args));

        let console = processor.into_console();
        assert_eq!(
            console.output(),
            "> \n> \n> 'nope' is not a valid command. Use '?' to see available commands.\n\n> "
        );
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let registry = registry();
        let settings = Settings::default();
        let mut console = BufferConsole::with_input(["svc ping"]);
        let mut processor = Processor::new(&settings, &registry, &mut console);
        Shell::new(&mut processor).run();
        assert_eq!(console.output(), "> \n> ");
    }
}
