//! Parsing core of the MUSH shell.
//!
//! This crate exposes a minimal API so fuzz targets and black-box tests can
//! link only the tokenizer and redirection planner without pulling in the
//! interactive deps.

mod parse;

pub use parse::{CommandSpec, OutputRedirection, ParsedLine, Redirection, BACKGROUND_TOKEN};

/// Tokenize a raw input line into an argument list and background flag.
pub fn parse_tokens(input: &str) -> ParsedLine {
    parse::parse_line(input)
}

/// Remove redirection pairs from an argument list.
pub fn resolve_redirections(args: Vec<String>) -> CommandSpec {
    parse::resolve_redirections(args)
}

/// Fuzz helper for parser-only targets.
pub fn fuzz_parse_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    let line = parse::parse_line(&input);
    let count = line.args.len();
    let spec = parse::resolve_redirections(line.args);
    assert!(spec.args.len() + 2 * spec.redirections.len() == count);
    assert!(spec.args.iter().all(|arg| !arg.is_empty() && !arg.contains(' ')));
}
