#![cfg(all(target_os = "linux", feature = "pty-tests"))]

use portable_pty::{CommandBuilder, PtySize, native_pty_system};
use serial_test::serial;
use std::fs;
use std::io::{Read, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

struct PtySession {
    writer: Box<dyn Write + Send>,
    rx: Receiver<String>,
    buffer: String,
    pid: u32,
}

impl PtySession {
    fn spawn() -> anyhow::Result<Self> {
        let pty_system = native_pty_system();
        let pair = pty_system.openpty(PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        })?;
        let mut cmd = CommandBuilder::new(bin_path());
        cmd.arg("--norc");
        cmd.env("MUSH_BACKGROUND_DELAY_MS", "0");
        let child = pair.slave.spawn_command(cmd)?;
        let pid = child.process_id().unwrap_or(0);
        if pid == 0 {
            return Err(anyhow::anyhow!("failed to get child pid"));
        }

        let mut reader = pair.master.try_clone_reader()?;
        let writer = pair.master.take_writer()?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = [0u8; 1024];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            writer,
            rx,
            buffer: String::new(),
            pid,
        })
    }

    fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn read_until_prompt(&mut self, timeout: Duration) -> anyhow::Result<String> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if let Ok(chunk) = self.rx.recv_timeout(Duration::from_millis(50)) {
                self.buffer.push_str(&chunk);
                if looks_like_prompt(&self.buffer) {
                    let out = self.buffer.clone();
                    self.buffer.clear();
                    return Ok(out);
                }
            }
        }
        Err(anyhow::anyhow!("timeout waiting for prompt"))
    }
}

fn looks_like_prompt(buf: &str) -> bool {
    buf.contains("$ ")
}

fn bin_path() -> String {
    env!("CARGO_BIN_EXE_mush").to_string()
}

fn list_children(pid: u32) -> Vec<u32> {
    let path = format!("/proc/{pid}/task/{pid}/children");
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .split_whitespace()
        .filter_map(|part| part.parse::<u32>().ok())
        .collect()
}

fn is_zombie(pid: u32) -> bool {
    let path = format!("/proc/{pid}/stat");
    let Ok(content) = fs::read_to_string(path) else {
        return false;
    };
    let close = match content.rfind(')') {
        Some(pos) => pos,
        None => return false,
    };
    let state = content.get(close + 2..close + 3).unwrap_or("");
    state == "Z"
}

#[test]
#[serial]
fn pty_banner_prompt_and_help() -> anyhow::Result<()> {
    let mut session = PtySession::spawn()?;
    let banner = session.read_until_prompt(Duration::from_secs(2))?;
    assert!(banner.contains("THE MODULAR UNIVERSAL SHELL"));
    session.send_line("help")?;
    let output = session.read_until_prompt(Duration::from_secs(2))?;
    assert!(output.contains("exit: exit the shell"));
    session.send_line("definitelynotacommand")?;
    let output = session.read_until_prompt(Duration::from_secs(2))?;
    assert!(output.contains("\x1b[31;1m mush: `definitelynotacommand` - command not found."));
    session.send_line("exit")?;
    Ok(())
}

#[test]
#[serial]
fn background_job_prints_pid_and_is_reaped() -> anyhow::Result<()> {
    let mut session = PtySession::spawn()?;
    session.read_until_prompt(Duration::from_secs(2))?;
    let started = Instant::now();
    session.send_line("sleep 0.1 &")?;
    let output = session.read_until_prompt(Duration::from_secs(2))?;
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(
        output.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
        }),
        "no pid in {output:?}"
    );
    thread::sleep(Duration::from_millis(300));
    session.send_line("true")?;
    session.read_until_prompt(Duration::from_secs(2))?;
    let children = list_children(session.pid);
    let zombies: Vec<u32> = children.into_iter().filter(|pid| is_zombie(*pid)).collect();
    assert!(zombies.is_empty(), "zombie children found: {zombies:?}");
    session.send_line("exit")?;
    Ok(())
}
