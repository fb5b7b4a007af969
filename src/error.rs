//! Error types and reporting for the shell.
//!
//! No error here is fatal to the shell itself: the read loop prints it,
//! records a status, and shows the next prompt.

use std::fmt;
use std::io;

/// Categorized error types for better diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A built-in was called with a missing or unusable argument
    InvalidArgument,
    /// A redirection target could not be opened
    RedirectionFailed,
    /// The OS refused to create another process
    ResourceExhausted,
    /// Any other failure while launching or waiting on a command
    Execution,
    /// Error loading/parsing configuration
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
            ErrorKind::RedirectionFailed => write!(f, "redirection failed"),
            ErrorKind::ResourceExhausted => write!(f, "resource exhausted"),
            ErrorKind::Execution => write!(f, "execution error"),
            ErrorKind::Config => write!(f, "config error"),
        }
    }
}

/// Rich error type with context information
#[derive(Debug, Clone)]
pub struct ShellError {
    pub kind: ErrorKind,
    pub message: String,
    /// Additional context, usually the underlying OS error
    pub context: Option<String>,
}

impl ShellError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ShellError {
            kind,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn redirection(path: &str, err: &io::Error) -> Self {
        Self::new(ErrorKind::RedirectionFailed, format!("{path}: cannot open"))
            .with_context(err.to_string())
    }

    /// Status recorded as the shell's last status when this error aborts a command.
    pub fn status(&self) -> i32 {
        match self.kind {
            ErrorKind::ResourceExhausted => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ShellError {}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::new(ErrorKind::Execution, err.to_string())
    }
}

/// Convenience type alias for Results with ShellError
pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = ShellError::invalid_argument("cd: missing directory operand");
        assert_eq!(
            err.to_string(),
            "invalid argument: cd: missing directory operand"
        );

        let io_err = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let err = ShellError::redirection("in.txt", &io_err);
        assert_eq!(err.kind, ErrorKind::RedirectionFailed);
        assert_eq!(
            err.to_string(),
            "redirection failed: in.txt: cannot open (No such file or directory)"
        );
    }

    #[test]
    fn resource_errors_have_distinct_status() {
        let err = ShellError::new(ErrorKind::ResourceExhausted, "fork failed");
        assert_eq!(err.status(), 2);
        assert_eq!(ShellError::invalid_argument("x").status(), 1);
    }
}
