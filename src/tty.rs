//! Terminal I/O utilities.
//!
//! Provides TTY detection and line prompting over any reader/writer pair.

use crate::error::{Error, Result};
use std::io::{self, BufRead, IsTerminal, Write};

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

/// Print `message` without a newline and read one line.
///
/// Returns `None` once the input is exhausted. The trailing newline is
/// stripped; interpretation is left to the caller.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(out, "{}", message)
        .and_then(|_| out.flush())
        .map_err(|e| Error::internal_io(e.to_string(), Some("write prompt".to_string())))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| Error::internal_io(e.to_string(), Some("read input".to_string())))?;

    if read == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Print status message to stderr if running in a terminal.
pub fn status(message: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_reads_one_line() {
        let mut input = Cursor::new("2\r\nq\n");
        let mut out = Vec::new();

        let line = prompt(&mut input, &mut out, "Select > ").unwrap();
        assert_eq!(line.as_deref(), Some("2"));
        assert_eq!(String::from_utf8(out).unwrap(), "Select > ");

        let line = prompt(&mut input, &mut Vec::new(), "").unwrap();
        assert_eq!(line.as_deref(), Some("q"));
    }

    #[test]
    fn prompt_returns_none_at_eof() {
        let mut input = Cursor::new("");
        assert_eq!(prompt(&mut input, &mut Vec::new(), "> ").unwrap(), None);
    }

    #[test]
    fn blank_line_is_not_eof() {
        let mut input = Cursor::new("\n");
        assert_eq!(
            prompt(&mut input, &mut Vec::new(), "> ").unwrap().as_deref(),
            Some("")
        );
    }
}
