pub const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn parse_color_mode(value: &str) -> Option<ColorMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(ColorMode::Auto),
        "1" | "yes" | "true" | "on" | "always" => Some(ColorMode::Always),
        "0" | "no" | "false" | "off" | "never" => Some(ColorMode::Never),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct ColorConfig {
    pub mode: ColorMode,
    pub error: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            mode: ColorMode::Auto,
            error: "bright_red".to_string(),
        }
    }
}

impl ColorConfig {
    pub fn enabled(&self, interactive: bool) -> bool {
        match self.mode {
            ColorMode::Auto => interactive,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

pub fn resolve_color(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return String::new();
    }
    if let Some(rest) = trimmed.strip_prefix("ansi:") {
        return rest.to_string();
    }
    if trimmed.contains('\x1b') {
        return trimmed.to_string();
    }
    match trimmed.to_lowercase().as_str() {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "bright_red" => "\x1b[31;1m",
        "bold" => "\x1b[1m",
        _ => "",
    }
    .to_string()
}

/// Wrap `text` in `color`, padded with a space on each side the way the
/// shell's error banners have always looked.
pub fn paint(text: &str, color: &str) -> String {
    let code = resolve_color(color);
    if code.is_empty() {
        return text.to_string();
    }
    format!("{code} {text} {RESET}")
}
