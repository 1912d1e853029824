// User-facing progress output for a run
// One dotted line per language, similar to pre-commit style runners

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use crate::orchestrator::{LanguageOutcome, RunSummary};

/// Simple output configuration for user-facing display
#[derive(Debug, Clone)]
pub struct UserOutputConfig {
    pub verbose: bool,
    pub quiet: bool,
    pub use_colors: bool,
}

impl UserOutputConfig {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let use_colors = io::stdout().is_terminal()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
            && std::env::var("NO_COLOR").is_err();

        Self {
            verbose,
            quiet,
            use_colors,
        }
    }

    /// No output at all; used when driving runs programmatically
    pub fn silent() -> Self {
        Self {
            verbose: false,
            quiet: true,
            use_colors: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Colors {
    pub green: &'static str,
    pub red: &'static str,
    pub blue: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub fn new(use_colors: bool) -> Self {
        if use_colors {
            Self {
                green: "\x1b[32m",
                red: "\x1b[31m",
                blue: "\x1b[34m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                green: "",
                red: "",
                blue: "",
                reset: "",
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct UserOutput {
    config: UserOutputConfig,
    colors: Colors,
}

impl UserOutput {
    pub fn new(config: UserOutputConfig) -> Self {
        let colors = Colors::new(config.use_colors);
        Self { config, colors }
    }

    /// Show language start with dotted progress line
    pub fn show_language_start(&self, display_name: &str) {
        if self.config.quiet {
            return;
        }

        print!("{}", self.format_language_name(display_name));
        io::stdout().flush().unwrap_or(());
    }

    pub fn show_language_passed(&self, outcome: &LanguageOutcome) {
        if self.config.quiet {
            return;
        }

        println!("{}Passed{}", self.colors.green, self.colors.reset);
        if self.config.verbose {
            self.show_duration(outcome.duration);
        }
    }

    pub fn show_language_failed(&self) {
        if self.config.quiet {
            return;
        }

        println!("{}Failed{}", self.colors.red, self.colors.reset);
    }

    fn show_duration(&self, duration: Duration) {
        println!(
            "  {}Duration: {:.2}s{}",
            self.colors.blue,
            duration.as_secs_f64(),
            self.colors.reset
        );
    }

    pub fn show_summary(&self, summary: &RunSummary) {
        if self.config.quiet || !self.config.verbose {
            return;
        }

        println!(
            "{}All {} languages passed{} ({})",
            self.colors.green,
            summary.passed.len(),
            self.colors.reset,
            summary.passed.join(", ")
        );
    }

    /// Pad the display name with dots to a fixed width
    fn format_language_name(&self, display_name: &str) -> String {
        const MAX_WIDTH: usize = 40;

        let label = format!("Checking {display_name}");
        let width = label.chars().count();
        if width >= MAX_WIDTH {
            label
        } else {
            format!("{label}{}", ".".repeat(MAX_WIDTH - width))
        }
    }
}
