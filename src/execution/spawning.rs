use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use log::debug;

use crate::error::{ErrorKind, ShellError, ShellResult};
use crate::parse::CommandSpec;

use super::redirection::BoundStreams;
use super::is_resource_error;

pub(crate) enum Launch {
    Started(Child),
    NotFound,
}

/// Join a search directory and a command name the way a path string would
/// be concatenated, so a name with slashes is never treated as absolute.
pub(crate) fn candidate_path(dir: &Path, name: &str) -> PathBuf {
    let mut joined = OsString::from(dir.as_os_str());
    joined.push("/");
    joined.push(name);
    PathBuf::from(joined)
}

pub(crate) fn build_command(program: &Path, spec: &CommandSpec) -> Command {
    let mut command = Command::new(program);
    if let Some((name, rest)) = spec.args.split_first() {
        command.arg0(name);
        command.args(rest);
    }
    command
}

/// Try each search directory in order until one launch succeeds.
///
/// Any launch error other than running out of processes or memory moves on to
/// the next directory, the same as an exec that failed to find its binary.
pub(crate) fn launch(
    spec: &CommandSpec,
    search_path: &[PathBuf],
    streams: &BoundStreams,
    trace: bool,
) -> ShellResult<Launch> {
    let Some(name) = spec.args.first() else {
        return Err(ShellError::invalid_argument("empty command"));
    };
    for dir in search_path {
        let program = candidate_path(dir, name);
        let mut command = build_command(&program, spec);
        streams.apply(&mut command)?;
        match command.spawn() {
            Ok(child) => {
                if trace {
                    eprintln!("trace: spawn pid {} program {}", child.id(), program.display());
                }
                debug!(
                    "job event=spawn pid={} program={} redirected={}",
                    child.id(),
                    program.display(),
                    !streams.is_empty()
                );
                return Ok(Launch::Started(child));
            }
            Err(err) if is_resource_error(&err) => {
                return Err(ShellError::new(
                    ErrorKind::ResourceExhausted,
                    format!("{name}: cannot create process"),
                )
                .with_context(err.to_string()));
            }
            Err(err) => {
                debug!(
                    "job event=launch-miss program={} error={}",
                    program.display(),
                    err
                );
            }
        }
    }
    Ok(Launch::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_line, resolve_redirections};
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn plan(input: &str) -> CommandSpec {
        resolve_redirections(parse_line(input).args)
    }

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn candidate_path_never_escapes_the_directory() {
        assert_eq!(
            candidate_path(Path::new("/bin"), "ls"),
            PathBuf::from("/bin/ls")
        );
        assert_eq!(
            candidate_path(Path::new("/bin"), "/usr/bin/env"),
            PathBuf::from("/bin//usr/bin/env")
        );
    }

    #[test]
    fn argv0_is_the_bare_name() {
        let spec = plan("ls -la");
        let command = build_command(Path::new("/bin/ls"), &spec);
        assert_eq!(command.get_program(), "/bin/ls");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["-la"]);
    }

    #[test]
    fn falls_back_to_later_directories() {
        let empty = tempdir().unwrap();
        let bin = tempdir().unwrap();
        let out = tempdir().unwrap();
        let marker = out.path().join("ran.txt");
        write_script(bin.path(), "mark", &format!("echo \"$1\" > {}", marker.display()));

        let spec = plan("mark first");
        let search = vec![empty.path().to_path_buf(), bin.path().to_path_buf()];
        match launch(&spec, &search, &BoundStreams::default(), false).unwrap() {
            Launch::Started(mut child) => {
                assert!(child.wait().unwrap().success());
            }
            Launch::NotFound => panic!("script should have been found"),
        }
        assert_eq!(fs::read_to_string(&marker).unwrap(), "first\n");
    }

    #[test]
    fn non_executable_file_is_skipped() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("tool"), "not a program").unwrap();
        write_script(second.path(), "tool", "exit 3");

        let spec = plan("tool");
        let search = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        match launch(&spec, &search, &BoundStreams::default(), false).unwrap() {
            Launch::Started(mut child) => {
                assert_eq!(child.wait().unwrap().code(), Some(3));
            }
            Launch::NotFound => panic!("second directory should have been used"),
        }
    }

    #[test]
    fn exhausted_search_path_is_not_found() {
        let empty = tempdir().unwrap();
        let spec = plan("definitelynotacommand");
        let search = vec![empty.path().to_path_buf()];
        assert!(matches!(
            launch(&spec, &search, &BoundStreams::default(), false).unwrap(),
            Launch::NotFound
        ));
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = launch(&CommandSpec::new(), &[], &BoundStreams::default(), false)
            .err()
            .unwrap();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }
}
