//! Command dispatch: built-in short-circuit, otherwise redirect, launch and
//! supervise one child process.

use std::io::Write;

use log::debug;

use crate::builtins::{execute_builtin, is_builtin};
use crate::colors::paint;
use crate::config::ShellConfig;
use crate::error::ShellResult;
use crate::execution::{launch, not_found_message, open_redirections, Launch, NOT_FOUND_STATUS};
use crate::job_control::{detach, reap_jobs, wait_foreground, BackgroundJob};
use crate::parse::{resolve_redirections, ParsedLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to run.
    Empty,
    Builtin,
    /// A foreground child ran to completion.
    Exited { status: i32 },
    Background { pid: u32 },
    /// No search directory could launch the program. No child exists, so a
    /// trailing `&` prints no pid and the message goes to the shell's output
    /// even when stdout is redirected.
    NotFound { name: String },
}

impl Outcome {
    pub fn status(&self) -> i32 {
        match self {
            Outcome::Empty | Outcome::Builtin | Outcome::Background { .. } => 0,
            Outcome::Exited { status } => *status,
            Outcome::NotFound { .. } => NOT_FOUND_STATUS,
        }
    }
}

pub struct Dispatcher<W: Write> {
    pub config: ShellConfig,
    pub jobs: Vec<BackgroundJob>,
    pub colors: bool,
    pub trace: bool,
    out: W,
}

impl<W: Write> Dispatcher<W> {
    pub fn new(config: ShellConfig, out: W) -> Self {
        Self {
            config,
            jobs: Vec::new(),
            colors: false,
            trace: false,
            out,
        }
    }

    pub fn dispatch(&mut self, line: ParsedLine) -> ShellResult<Outcome> {
        if line.is_empty() {
            return Ok(Outcome::Empty);
        }
        if is_builtin(line.command_name()) {
            execute_builtin(&line.args, &mut self.out)?;
            return Ok(Outcome::Builtin);
        }

        let ParsedLine { args, background } = line;

        let display = args.join(" ");
        let spec = resolve_redirections(args);
        if self.trace {
            eprintln!("trace: argv: {:?}", spec.args);
            for redir in &spec.redirections {
                eprintln!("trace: redirect {} {}", redir.operator(), redir.path());
            }
        }
        let streams = open_redirections(&spec)?;
        // Anything buffered must reach the terminal before the child writes.
        self.out.flush()?;

        let child = match launch(&spec, &self.config.search_path, &streams, self.trace)? {
            Launch::Started(child) => child,
            Launch::NotFound => {
                let name = spec.args.first().cloned().unwrap_or_default();
                self.report_not_found(&name)?;
                return Ok(Outcome::NotFound { name });
            }
        };

        if background {
            let pid = detach(
                child,
                &display,
                self.config.background_delay,
                &mut self.jobs,
                &mut self.out,
            )?;
            return Ok(Outcome::Background { pid });
        }
        let status = wait_foreground(child)?;
        Ok(Outcome::Exited { status })
    }

    /// Reap finished background children; called once per prompt.
    pub fn reap(&mut self) {
        if !self.jobs.is_empty() {
            reap_jobs(&mut self.jobs);
        }
    }

    fn report_not_found(&mut self, name: &str) -> ShellResult<()> {
        debug!("job event=not-found name={}", name);
        let message = not_found_message(name);
        if self.colors {
            writeln!(self.out, "{}", paint(&message, &self.config.colors.error))?;
        } else {
            writeln!(self.out, "{message}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
