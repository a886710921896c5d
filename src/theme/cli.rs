//! ANSI color helpers and CLI text formatting

use std::env;

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

/// ANSI color codes for CLI output
pub mod ansi {
    /// Gray color (ANSI 37) - used for descriptions
    pub const GRAY: &str = "\x1b[37m";
    /// Green color (ANSI 32) - used for accent/success
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow color (ANSI 33) - used for warnings and skipped flavors
    pub const YELLOW: &str = "\x1b[33m";
    /// Red color (ANSI 31) - used for errors
    pub const RED: &str = "\x1b[31m";
    /// Dark gray (ANSI 90) - used for secondary text
    pub const DARK_GRAY: &str = "\x1b[90m";
    /// Reset color
    pub const RESET: &str = "\x1b[0m";
}

/// Decide whether output should be colored.
///
/// `NO_COLOR` set to anything non-empty disables color, as does a stdout
/// that is not a terminal.
pub fn colors_enabled(no_color: Option<&str>, stdout_is_tty: bool) -> bool {
    stdout_is_tty && no_color.map_or(true, str::is_empty)
}

/// CLI text colorizer.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Theme for the current process' stdout and environment.
    pub fn detect() -> Self {
        let no_color = env::var("NO_COLOR").ok();
        Self::new(colors_enabled(
            no_color.as_deref(),
            atty::is(atty::Stream::Stdout),
        ))
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    /// Format text with the success color.
    pub fn success_text(&self, text: &str) -> String {
        self.paint(ansi::GREEN, text)
    }

    /// Format text with the warning color.
    pub fn warning_text(&self, text: &str) -> String {
        self.paint(ansi::YELLOW, text)
    }

    /// Format text with the error color.
    pub fn error_text(&self, text: &str) -> String {
        self.paint(ansi::RED, text)
    }

    /// Format text with the secondary color.
    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(ansi::DARK_GRAY, text)
    }

    /// Format text with the primary color.
    pub fn primary_text(&self, text: &str) -> String {
        self.paint(ansi::GRAY, text)
    }
}
