// Logging system for cfgcheck
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::Result;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Level,
    /// Output format (full or pretty for terminals, json for programmatic use)
    pub format: LogFormat,
    /// Color output configuration
    pub color: ColorConfig,
    /// Whether to show targets (module names)
    pub show_targets: bool,
    /// Where log lines go
    pub destination: LogDestination,
}

/// Log output format options
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Single-line records with timestamp, level and fields
    Full,
    /// Multi-line records, one field per line
    Pretty,
    Json,
    Compact,
}

/// Color output configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ColorConfig {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogDestination {
    Stderr,
    /// Truncated when logging starts
    File(PathBuf),
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Full,
            color: ColorConfig::Auto,
            show_targets: false,
            destination: LogDestination::Stderr,
        }
    }
}

impl LogConfig {
    /// Console logging for the test runner
    pub fn for_runner(debug: bool, format: LogFormat) -> Self {
        Self {
            level: if debug { Level::DEBUG } else { Level::INFO },
            format,
            ..Self::default()
        }
    }

    /// File logging for the bootstrapper: everything at debug, no colours
    pub fn for_bootstrap(log_file: PathBuf) -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Compact,
            color: ColorConfig::Never,
            show_targets: true,
            destination: LogDestination::File(log_file),
        }
    }

    /// Check if colors should be used based on configuration and terminal
    pub fn should_use_colors(&self) -> bool {
        if let LogDestination::File(_) = self.destination {
            return false;
        }
        match self.color {
            ColorConfig::Always => true,
            ColorConfig::Never => false,
            ColorConfig::Auto => {
                io::stderr().is_terminal()
                    && std::env::var("TERM").map_or(true, |term| term != "dumb")
                    && std::env::var("NO_COLOR").is_err()
            }
        }
    }

    /// Default filter directives; `RUST_LOG` replaces them when set
    pub fn filter_directives(&self) -> String {
        let level = self.level.as_str().to_ascii_lowercase();
        format!("cfgcheck={level},cfgcheck_bootstrap={level}")
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));
    let ansi = config.should_use_colors();

    let result = match &config.destination {
        LogDestination::Stderr => {
            let builder = fmt()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .with_ansi(ansi)
                .with_target(config.show_targets);
            match config.format {
                LogFormat::Full => builder.try_init(),
                LogFormat::Pretty => builder.pretty().try_init(),
                LogFormat::Compact => builder.compact().try_init(),
                LogFormat::Json => builder.json().try_init(),
            }
        }
        LogDestination::File(path) => {
            let file = File::create(path)?;
            fmt()
                .with_env_filter(env_filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(config.show_targets)
                .without_time()
                .compact()
                .try_init()
        }
    };
    result.map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(())
}
