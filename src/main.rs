use std::env;

mod builtins;
mod colors;
mod config;
mod dispatch;
mod error;
mod execution;
mod io_helpers;
mod job_control;
mod parse;
mod repl;

use repl::{init_state, run_once, show_banner, shutdown, LoopControl, StartupOptions};

fn main() {
    init_logging();
    let mut options = StartupOptions::default();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-x" => options.trace = true,
            "--no-banner" => options.no_banner = true,
            "--norc" => options.no_rc = true,
            other => {
                eprintln!("mush: unknown option '{other}'");
                eprintln!("usage: mush [-x] [--no-banner] [--norc]");
                std::process::exit(2);
            }
        }
    }
    let interactive = unsafe { libc::isatty(libc::STDIN_FILENO) == 1 };
    let mut state = match init_state(options, interactive) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("error: {err}");
            return;
        }
    };
    show_banner(&state);

    loop {
        match run_once(&mut state) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => {
                eprintln!("error: {err}");
                break;
            }
        }
    }
    shutdown(&mut state);
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("MUSH_LOG", "info");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
