use std::io;
use std::os::unix::process::ExitStatusExt;

mod redirection;
mod spawning;

pub(crate) use redirection::open_redirections;
pub(crate) use spawning::{launch, Launch};

/// Status reported for a command no search directory could launch.
pub const NOT_FOUND_STATUS: i32 = 127;

pub fn exit_status_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        code
    } else if let Some(sig) = status.signal() {
        128 + sig
    } else {
        1
    }
}

/// Launch errors that mean the OS could not create a process at all, as
/// opposed to the program being absent or unusable.
pub(crate) fn is_resource_error(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(libc::EAGAIN) | Some(libc::ENOMEM)
    ) || err.kind() == io::ErrorKind::OutOfMemory
}

pub fn not_found_message(name: &str) -> String {
    format!("mush: `{name}` - command not found.")
}
