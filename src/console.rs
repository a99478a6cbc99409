//! Console boundary: the engine writes and reads only through [`Console`].

use std::io::{self, BufRead, Write};

/// Line-oriented output and input used by the processor and the shell.
pub trait Console {
    fn write_line(&mut self, line: &str);
    fn write(&mut self, text: &str);
    /// Next input line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

impl<W: Console + ?Sized> Console for &mut W {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }

    fn write(&mut self, text: &str) {
        (**self).write(text);
    }

    fn read_line(&mut self) -> Option<String> {
        (**self).read_line()
    }
}

/// Console backed by the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn write(&mut self, text: &str) {
        print!("{text}");
        io::stdout().flush().ok();
    }

    fn read_line(&mut self) -> Option<String> {
        let mut buffer = String::new();
        match io::stdin().lock().read_line(&mut buffer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(buffer.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

/// In-memory console: scripted input lines and captured output.
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    input: Vec<String>,
    output: String,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Console whose `read_line` yields `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input: Vec<String> = lines.into_iter().map(Into::into).collect();
        input.reverse();
        Self {
            input,
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Captured output split into lines.
    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    pub fn clear(&mut self) {
        self.output.clear();
    }
}

impl Console for BufferConsole {
    fn write_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn read_line(&mut self) -> Option<String> {
        self.input.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_console_records_and_replays() {
        let mut console = BufferConsole::with_input(["first", "second"]);
        console.write("> ");
        console.write_line("hello");
        console.write_line("");
        assert_eq!(console.output(), "> hello\n\n");
        assert_eq!(console.lines(), vec!["> hello", ""]);
        assert_eq!(console.read_line().as_deref(), Some("first"));
        assert_eq!(console.read_line().as_deref(), Some("second"));
        assert_eq!(console.read_line(), None);
    }
}
