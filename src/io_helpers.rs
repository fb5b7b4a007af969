use std::io::{self, BufRead};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub const EXIT_COMMAND: &str = "exit";

pub fn read_input_line(
    editor: Option<&mut DefaultEditor>,
    prompt: &str,
) -> io::Result<Option<String>> {
    if let Some(editor) = editor {
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => return Ok(Some(String::new())),
            Err(ReadlineError::Eof) => return Ok(None),
            // A line the terminal could not decode is dropped, not fatal.
            Err(ReadlineError::Io(ref e)) if e.kind() == io::ErrorKind::InvalidData => return Ok(Some(String::new())),
            Err(err) => return Err(io::Error::other(err)),
        };
        Ok(Some(line))
    } else {
        read_plain_line(&mut io::stdin().lock())
    }
}

/// Read one raw line; bytes that are not UTF-8 are replaced, never rejected.
pub fn read_plain_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// The loop ends only on a line that is exactly `exit` once the reader's
/// line terminator is dropped; `exit 1` or ` exit` keep the shell running.
pub fn is_exit_line(raw: &str) -> bool {
    let line = raw
        .strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(raw);
    line == EXIT_COMMAND
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn plain_reader_keeps_going_past_invalid_utf8() {
        let mut input = Cursor::new(b"echo caf\xe9\nhelp\n".to_vec());
        assert_eq!(
            read_plain_line(&mut input).unwrap().as_deref(),
            Some("echo caf\u{FFFD}\n")
        );
        assert_eq!(read_plain_line(&mut input).unwrap().as_deref(), Some("help\n"));
        assert_eq!(read_plain_line(&mut input).unwrap(), None);
    }

    #[test]
    fn exit_matches_raw_line_only() {
        assert!(is_exit_line("exit"));
        assert!(is_exit_line("exit\n"));
        assert!(is_exit_line("exit\r\n"));
        assert!(!is_exit_line("exit foo\n"));
        assert!(!is_exit_line(" exit\n"));
        assert!(!is_exit_line("exit \n"));
        assert!(!is_exit_line("exit\n\n"));
        assert!(!is_exit_line("quit\n"));
    }
}
