// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Provides standardized formatting for errors, warnings and hints on stderr

use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Centralized CLI output utilities for consistent formatting
pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Create CLI output utility with explicit color setting
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.format("error:", message));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.format("warning:", message));
    }

    pub fn hint(&self, message: &str) {
        eprintln!("{}", self.format("hint:", message));
    }

    fn format(&self, label: &str, message: &str) -> String {
        if !self.use_color {
            return format!("{} {}", label, message);
        }
        let label = match label {
            "error:" => label.red().bold().to_string(),
            "warning:" => label.yellow().bold().to_string(),
            _ => label.blue().bold().to_string(),
        };
        format!("{} {}", label, message)
    }
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}
