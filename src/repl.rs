use rustyline::{Config, DefaultEditor, EditMode};
use std::env;
use std::io::{self, Stdout};
use std::path::PathBuf;

use log::debug;

use crate::config::{apply_env_overrides, build_prompt, load_config, ShellConfig};
use crate::dispatch::Dispatcher;
use crate::io_helpers::{is_exit_line, read_input_line};
use crate::parse::parse_line;

const BANNER: &[&str] = &[
    "\t   __  ___ __  __ ____ __ __",
    "\t  /  |/  // / / // __// // /",
    "\t / /|_/ // /_/ /_\\ \\ / _  /",
    "\t/_/  /_/ \\____//___//_//_/\n",
    "\tTHE MODULAR UNIVERSAL SHELL\n",
    "Welcome to the MUSH shell!",
    "Created by Brandon Fairchild\n",
    "Enter `help` at any time to get extra information.",
    "Type `exit` to close the shell.\n",
];

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StartupOptions {
    pub(crate) trace: bool,
    pub(crate) no_banner: bool,
    pub(crate) no_rc: bool,
}

pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub(crate) struct ShellState {
    // Only present when stdin is a terminal.
    pub(crate) editor: Option<DefaultEditor>,
    pub(crate) dispatcher: Dispatcher<Stdout>,
    pub(crate) last_status: i32,
    pub(crate) interactive: bool,
    pub(crate) trace: bool,
}

pub(crate) fn init_state(options: StartupOptions, interactive: bool) -> io::Result<ShellState> {
    let mut config = ShellConfig::default();
    if !options.no_rc {
        if let Err(err) = load_config(&mut config) {
            eprintln!("config error: {err}");
        }
    }
    apply_env_overrides(&mut config);
    if options.no_banner {
        config.banner = false;
    }

    let editor = if interactive {
        let edit_mode = match env::var("MUSH_EDITMODE").ok().as_deref() {
            Some("vi") | Some("VI") => EditMode::Vi,
            _ => EditMode::Emacs,
        };
        let editor_config = Config::builder()
            .auto_add_history(true)
            .edit_mode(edit_mode)
            .build();
        let mut editor = DefaultEditor::with_config(editor_config).map_err(io::Error::other)?;
        if let Some(path) = history_path() {
            let _ = editor.load_history(&path);
        }
        Some(editor)
    } else {
        None
    };

    let mut dispatcher = Dispatcher::new(config, io::stdout());
    dispatcher.colors = dispatcher.config.colors.enabled(interactive);
    dispatcher.trace = options.trace;

    Ok(ShellState {
        editor,
        dispatcher,
        last_status: 0,
        interactive,
        trace: options.trace,
    })
}

pub(crate) fn show_banner(state: &ShellState) {
    if state.interactive && state.dispatcher.config.banner {
        for line in BANNER {
            println!("{line}");
        }
    }
}

pub(crate) fn run_once(state: &mut ShellState) -> io::Result<LoopControl> {
    state.dispatcher.reap();
    let cwd = env::current_dir().unwrap_or_else(|_| "/".into());
    let prompt = build_prompt(
        &state.dispatcher.config,
        state.interactive,
        state.last_status,
        &cwd,
    );

    let Some(line) = read_input_line(state.editor.as_mut(), &prompt)? else {
        if state.interactive {
            println!();
        }
        return Ok(LoopControl::Exit);
    };

    let parsed = parse_line(&line);
    if state.trace {
        eprintln!("trace: parsed tokens: {:?} background={}", parsed.args, parsed.background);
    }
    match state.dispatcher.dispatch(parsed) {
        Ok(outcome) => {
            debug!("shell event=dispatch outcome={:?}", outcome);
            state.last_status = outcome.status();
        }
        Err(err) => {
            eprintln!("mush: {err}");
            state.last_status = err.status();
        }
    }

    if is_exit_line(&line) {
        return Ok(LoopControl::Exit);
    }
    Ok(LoopControl::Continue)
}

pub(crate) fn shutdown(state: &mut ShellState) {
    state.dispatcher.reap();
    if let (Some(editor), Some(path)) = (state.editor.as_mut(), history_path()) {
        let _ = editor.save_history(&path);
    }
    debug!(
        "shell event=exit status={} background_jobs={}",
        state.last_status,
        state.dispatcher.jobs.len()
    );
}

fn history_path() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".mush_history"))
}
