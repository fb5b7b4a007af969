//! Tokenizer for shell input.
//!
//! Fields are separated by single spaces only; there is no quoting, escaping
//! or expansion. A lone `&` anywhere on the line marks the command as a
//! background job and is not passed on as an argument.
use crate::parse::ParsedLine;

pub const BACKGROUND_TOKEN: &str = "&";

const FIELD_SEPARATOR: char = ' ';

pub fn parse_line(input: &str) -> ParsedLine {
    let mut line = ParsedLine::default();
    for field in input.split(FIELD_SEPARATOR) {
        let token = strip_line_break(field);
        if token.is_empty() {
            continue;
        }
        if token == BACKGROUND_TOKEN {
            line.background = true;
            continue;
        }
        line.args.push(token.to_string());
    }
    line
}

// A newline ends the token it appears in, whatever follows it.
fn strip_line_break(field: &str) -> &str {
    match field.find('\n') {
        Some(pos) => &field[..pos],
        None => field,
    }
}
