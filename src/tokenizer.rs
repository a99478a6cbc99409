//! Quote-aware splitting of a raw command line into tokens.

use tracing::debug;

/// Split `input` on unquoted whitespace, keeping double-quoted runs together.
///
/// There are no escape sequences: a `"` always opens or closes a quoted run, and an
/// empty quoted run (`""`) produces no token. A quote that opens directly after a word
/// (`a"b c"`) ends the word first. An unterminated quote runs to the end of input.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in input.trim().chars() {
        match ch {
            '"' if quoted => {
                flush(&mut tokens, &mut current);
                quoted = false;
            }
            '"' => {
                flush(&mut tokens, &mut current);
                quoted = true;
            }
            c if c.is_whitespace() && !quoted => flush(&mut tokens, &mut current),
            c => current.push(c),
        }
    }
    flush(&mut tokens, &mut current);

    debug!(count = tokens.len(), "tokenized command line");
    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}
