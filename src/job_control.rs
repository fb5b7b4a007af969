use std::io::{self, Write};
use std::process::Child;
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::error::ShellResult;
use crate::execution::exit_status_code;

/// A background child the shell has stopped watching but still has to reap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundJob {
    pub pid: u32,
    pub command: String,
}

pub enum JobPoll {
    Done,
    Running,
}

/// Block until this child exits and return its status.
pub fn wait_foreground(mut child: Child) -> ShellResult<i32> {
    let pid = child.id();
    let status = child.wait()?;
    let code = exit_status_code(status);
    debug!("job event=wait pid={} status={}", pid, code);
    Ok(code)
}

/// Leave `child` running, record it for reaping, and print its pid after
/// `delay` so the child's first output comes before the next prompt.
pub fn detach<W: Write>(
    child: Child,
    command: &str,
    delay: Duration,
    jobs: &mut Vec<BackgroundJob>,
    out: &mut W,
) -> io::Result<u32> {
    let pid = child.id();
    drop(child);
    jobs.push(BackgroundJob {
        pid,
        command: command.to_string(),
    });
    debug!("job event=background pid={} command={}", pid, command);
    if !delay.is_zero() {
        thread::sleep(delay);
    }
    writeln!(out, "{pid}")?;
    out.flush()?;
    Ok(pid)
}

/// Drop every background job whose process has finished.
pub fn reap_jobs(jobs: &mut Vec<BackgroundJob>) {
    jobs.retain(|job| match poll_job_status(job.pid) {
        JobPoll::Done => {
            debug!("job event=reap done pid={} command={}", job.pid, job.command);
            false
        }
        JobPoll::Running => true,
    });
}

fn poll_job_status(pid: u32) -> JobPoll {
    let Ok(raw) = i32::try_from(pid) else {
        return JobPoll::Done;
    };
    loop {
        match waitpid(Pid::from_raw(raw), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(_, code)) => {
                debug!("job event=poll done pid={} status={}", pid, code);
                return JobPoll::Done;
            }
            Ok(WaitStatus::Signaled(_, signal, _)) => {
                debug!("job event=poll done pid={} signal={}", pid, signal);
                return JobPoll::Done;
            }
            Ok(WaitStatus::StillAlive) => return JobPoll::Running,
            Ok(_) => return JobPoll::Running,
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => return JobPoll::Done,
            Err(err) => {
                warn!("job event=poll pid={} error={}", pid, err);
                return JobPoll::Running;
            }
        }
    }
}
