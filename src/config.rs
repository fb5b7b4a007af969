use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;

use crate::colors::{parse_color_mode, ColorConfig, ColorMode};
use crate::error::{ErrorKind, ShellError, ShellResult};

pub const DEFAULT_SEARCH_PATH: [&str; 2] = ["/bin", "/usr/bin"];
pub const DEFAULT_PROMPT_SYMBOL: char = '$';
pub const DEFAULT_BACKGROUND_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Debug)]
pub struct ShellConfig {
    pub prompt_template: Option<String>,
    pub prompt_symbol: char,
    /// Directories tried in order when launching an external command.
    pub search_path: Vec<PathBuf>,
    /// Pause before a background pid is printed so the child's startup output lands first.
    pub background_delay: Duration,
    pub banner: bool,
    pub colors: ColorConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt_template: None,
            prompt_symbol: DEFAULT_PROMPT_SYMBOL,
            search_path: DEFAULT_SEARCH_PATH.iter().map(PathBuf::from).collect(),
            background_delay: DEFAULT_BACKGROUND_DELAY,
            banner: true,
            colors: ColorConfig::default(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".mushrc"))
}

pub fn load_config(config: &mut ShellConfig) -> io::Result<()> {
    let Some(path) = config_path() else {
        return Ok(());
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    debug!("config event=load path={}", path.display());
    load_config_lines(config, &content);
    Ok(())
}

pub fn load_config_lines(config: &mut ShellConfig, content: &str) {
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            eprintln!("config:{}: unrecognized directive", idx + 1);
            continue;
        };
        let value = strip_quotes(value.trim());
        if let Err(err) = apply_setting(config, key.trim(), value) {
            eprintln!("config:{}: {err}", idx + 1);
        }
    }
}

pub fn apply_env_overrides(config: &mut ShellConfig) {
    if let Ok(value) = env::var("MUSH_SEARCH_PATH") {
        if let Err(err) = apply_setting(config, "search_path", value.trim()) {
            eprintln!("config error: invalid MUSH_SEARCH_PATH: {err}");
        }
    }
    if let Ok(value) = env::var("MUSH_BACKGROUND_DELAY_MS") {
        if let Err(err) = apply_setting(config, "background_delay_ms", value.trim()) {
            eprintln!("config error: invalid MUSH_BACKGROUND_DELAY_MS: {err}");
        }
    }
    if let Ok(value) = env::var("MUSH_PROMPT") {
        config.prompt_template = Some(value);
    }
    if env::var_os("MUSH_NO_COLOR").is_some() {
        config.colors.mode = ColorMode::Never;
    }
}

pub fn apply_setting(config: &mut ShellConfig, key: &str, value: &str) -> ShellResult<()> {
    match key {
        "prompt" => config.prompt_template = Some(value.to_string()),
        "prompt_symbol" => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => config.prompt_symbol = symbol,
                _ => return Err(config_error(format!("prompt_symbol must be one character, got '{value}'"))),
            }
        }
        "search_path" => {
            let dirs: Vec<PathBuf> = value
                .split(':')
                .map(str::trim)
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .collect();
            if dirs.is_empty() {
                return Err(config_error("search_path is empty"));
            }
            config.search_path = dirs;
        }
        "background_delay_ms" => {
            let millis = value
                .parse::<u64>()
                .map_err(|_| config_error(format!("invalid delay '{value}'")))?;
            config.background_delay = Duration::from_millis(millis);
        }
        "banner" => config.banner = parse_switch(value)?,
        "color" => {
            config.colors.mode = parse_color_mode(value)
                .ok_or_else(|| config_error(format!("invalid color mode '{value}'")))?;
        }
        "color.error" => config.colors.error = value.to_string(),
        _ => return Err(config_error(format!("unknown key '{key}'"))),
    }
    Ok(())
}

pub fn build_prompt(config: &ShellConfig, interactive: bool, last_status: i32, cwd: &Path) -> String {
    if !interactive {
        return String::new();
    }
    match config.prompt_template {
        Some(ref template) => render_prompt_template(template, config.prompt_symbol, last_status, cwd),
        None => format!("{} ", config.prompt_symbol),
    }
}

pub fn render_prompt_template(template: &str, symbol: char, last_status: i32, cwd: &Path) -> String {
    let status_str = last_status.to_string();
    let status_opt = if last_status == 0 { "" } else { &status_str };
    let mut out = template.replace("{status?}", status_opt);
    out = out.replace("{status}", &status_str);
    out = out.replace("{cwd}", &cwd.display().to_string());
    out.replace("{symbol}", &symbol.to_string())
}

fn parse_switch(value: &str) -> ShellResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(config_error(format!("expected on/off, got '{value}'"))),
    }
}

fn config_error(message: impl Into<String>) -> ShellError {
    ShellError::new(ErrorKind::Config, message)
}

fn strip_quotes(input: &str) -> &str {
    let bytes = input.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &input[1..bytes.len() - 1];
        }
    }
    input
}
