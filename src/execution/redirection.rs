use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{ShellError, ShellResult};
use crate::parse::{CommandSpec, OutputRedirection, Redirection};

const CREATE_MODE: u32 = 0o666;

/// Files opened for a command's standard streams.
///
/// The shell only opens them; the child binds them onto fd 0 and fd 1 after
/// the fork, so the shell's own descriptors are never rebound.
#[derive(Debug, Default)]
pub(crate) struct BoundStreams {
    stdin: Option<File>,
    stdout: Option<File>,
}

impl BoundStreams {
    pub(crate) fn is_empty(&self) -> bool {
        self.stdin.is_none() && self.stdout.is_none()
    }

    /// Hand the streams to `command`. Files are cloned so a failed launch can
    /// be retried from the next search directory with the same targets.
    pub(crate) fn apply(&self, command: &mut Command) -> io::Result<()> {
        if let Some(ref file) = self.stdin {
            command.stdin(Stdio::from(file.try_clone()?));
        }
        if let Some(ref file) = self.stdout {
            command.stdout(Stdio::from(file.try_clone()?));
        }
        Ok(())
    }
}

/// Open every planned redirection in source order. Each stream keeps the
/// last file opened for it; earlier output targets are still created or
/// truncated on the way.
pub(crate) fn open_redirections(spec: &CommandSpec) -> ShellResult<BoundStreams> {
    let mut streams = BoundStreams::default();
    for redir in &spec.redirections {
        debug!(
            "redirect event=open op={} path={}",
            redir.operator(),
            redir.path()
        );
        match redir {
            Redirection::Input(path) => {
                let file = open_input(path).map_err(|err| ShellError::redirection(path, &err))?;
                streams.stdin = Some(file);
            }
            Redirection::Output(output) => {
                let file =
                    open_output(output).map_err(|err| ShellError::redirection(&output.path, &err))?;
                streams.stdout = Some(file);
            }
        }
    }
    Ok(streams)
}

fn open_input(path: &str) -> io::Result<File> {
    OpenOptions::new().read(true).open(path)
}

// `>>` never creates its target.
fn open_output(output: &OutputRedirection) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.write(true).mode(CREATE_MODE);
    if output.append {
        opts.append(true);
    } else {
        opts.create(true).truncate(true);
    }
    opts.open(&output.path)
}
