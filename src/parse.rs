//! Line parsing for the shell.
//!
//! Parsing happens in two passes that never touch the OS:
//! - the tokenizer turns a raw line into an argument list plus a background flag,
//! - the redirection planner pulls `<`, `>` and `>>` pairs out of that list.
//!
//! Opening files and launching processes is left to `execution`.

mod redirection_parser;
mod tokenizer;

pub use redirection_parser::resolve_redirections;
pub use tokenizer::{parse_line, BACKGROUND_TOKEN};

/// Result of tokenizing one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLine {
    pub args: Vec<String>,
    pub background: bool,
}

impl ParsedLine {
    pub fn command_name(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRedirection {
    pub path: String,
    pub append: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirection {
    Input(String),
    Output(OutputRedirection),
}

impl Redirection {
    pub fn operator(&self) -> &'static str {
        match self {
            Redirection::Input(_) => "<",
            Redirection::Output(out) if out.append => ">>",
            Redirection::Output(_) => ">",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Redirection::Input(path) => path.as_str(),
            Redirection::Output(out) => out.path.as_str(),
        }
    }
}

/// An argument vector with its redirections planned out, ready to launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub args: Vec<String>,
    /// Kept in source order; for each stream the last entry wins.
    pub redirections: Vec<Redirection>,
}

impl CommandSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdin(&self) -> Option<&str> {
        self.redirections.iter().rev().find_map(|redir| match redir {
            Redirection::Input(path) => Some(path.as_str()),
            Redirection::Output(_) => None,
        })
    }

    pub fn stdout(&self) -> Option<&OutputRedirection> {
        self.redirections.iter().rev().find_map(|redir| match redir {
            Redirection::Output(out) => Some(out),
            Redirection::Input(_) => None,
        })
    }
}
