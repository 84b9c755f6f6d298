// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Provides standardized formatting for errors, warnings and success messages

use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// User-facing messages go to stderr so stdout stays parseable.
pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal(),
        }
    }

    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "error:".red().bold(), message);
        } else {
            eprintln!("error: {}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "!".yellow(), message);
        } else {
            eprintln!("! {}", message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "✔".green(), message);
        } else {
            eprintln!("✔ {}", message);
        }
    }

    pub fn info(&self, message: &str) {
        eprintln!("{}", message);
    }
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_output_creation() {
        let cli_color = CliOutput::with_color(true);
        assert!(cli_color.use_color);

        let cli_no_color = CliOutput::with_color(false);
        assert!(!cli_no_color.use_color);
    }

    #[test]
    fn test_message_formatting() {
        let cli = CliOutput::with_color(false);

        // These don't capture output, but verify the methods can be called
        cli.error("test error");
        cli.warning("test warning");
        cli.success("test success");
        cli.info("test info");
    }
}
