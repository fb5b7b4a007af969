use std::env;
use std::io::Write;

use log::debug;

use crate::error::{ShellError, ShellResult};

pub const HELP_TEXT: [&str; 2] = ["usage:", "exit: exit the shell"];

pub fn is_builtin(cmd: Option<&str>) -> bool {
    matches!(cmd, Some("cd" | "help" | "exit"))
}

/// Run a built-in. Redirections and the background marker do not apply here.
pub fn execute_builtin<W: Write>(args: &[String], out: &mut W) -> ShellResult<()> {
    match args.first().map(String::as_str) {
        Some("cd") => change_directory(args.get(1).map(String::as_str)),
        Some("help") => {
            for line in HELP_TEXT {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
            Ok(())
        }
        // The read loop decides when to stop; here `exit` does nothing.
        Some("exit") => Ok(()),
        Some(other) => Err(ShellError::invalid_argument(format!(
            "{other}: not a built-in"
        ))),
        None => Ok(()),
    }
}

fn change_directory(target: Option<&str>) -> ShellResult<()> {
    let Some(target) = target else {
        return Err(ShellError::invalid_argument("cd: missing directory operand"));
    };
    env::set_current_dir(target).map_err(|err| {
        ShellError::invalid_argument(format!("cd: {target}")).with_context(err.to_string())
    })?;
    debug!("builtin event=cd target={}", target);
    Ok(())
}
